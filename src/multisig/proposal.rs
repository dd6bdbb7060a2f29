//! Proposal records and their confirmation sets
//!
//! A proposal is a recorded intent to perform one action. Ids are
//! sequential from 0 and never reused; proposals are retained forever
//! for audit, including after execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proposal identifier (index into the wallet's proposal table)
pub type ProposalId = u64;

/// An owner-set mutation, executable only through quorum
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceAction {
    AddOwner { identity: String },
    RemoveOwner { identity: String },
    ReplaceOwner { old: String, new: String },
    ChangeRequirement { required: usize },
}

/// What a proposal does when it executes
///
/// Governance is a tagged variant dispatched by the engine rather than a
/// re-entrant call back into the wallet, so its reachability is explicit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// Call an external destination, moving `value` of native currency
    Call {
        destination: String,
        value: u128,
        /// Opaque call data, uninterpreted by the wallet
        payload: Vec<u8>,
    },
    /// Mutate the wallet's own owner registry
    Governance(GovernanceAction),
}

impl ProposalAction {
    /// Whether this action targets the wallet's own registry
    pub fn is_governance(&self) -> bool {
        matches!(self, ProposalAction::Governance(_))
    }
}

/// A recorded action awaiting (or past) quorum
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub action: ProposalAction,
    /// Set to true exactly once, on successful execution
    pub executed: bool,
    /// Confirmer identities by value; quorum evaluation joins this
    /// against the live owner set, never a snapshot
    confirmations: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
}

impl Proposal {
    /// Create a fresh, unconfirmed proposal
    pub fn new(id: ProposalId, action: ProposalAction) -> Self {
        Self {
            id,
            action,
            executed: false,
            confirmations: Vec::new(),
            created_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Whether the given identity has a confirmation on record
    pub fn has_confirmed(&self, identity: &str) -> bool {
        self.confirmations.iter().any(|c| c == identity)
    }

    /// Record a confirmation (caller must have checked for duplicates)
    pub(crate) fn record_confirmation(&mut self, identity: &str) {
        self.confirmations.push(identity.to_string());
    }

    /// Clear one identity's confirmation
    pub(crate) fn clear_confirmation(&mut self, identity: &str) {
        self.confirmations.retain(|c| c != identity);
    }

    /// All recorded confirmers, including any who are no longer owners
    pub fn confirmers(&self) -> &[String] {
        &self.confirmations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_action() -> ProposalAction {
        ProposalAction::Call {
            destination: "dest".to_string(),
            value: 10,
            payload: vec![],
        }
    }

    #[test]
    fn test_new_proposal() {
        let proposal = Proposal::new(0, call_action());

        assert_eq!(proposal.id, 0);
        assert!(!proposal.executed);
        assert!(proposal.executed_at.is_none());
        assert!(proposal.confirmers().is_empty());
        assert!(!proposal.action.is_governance());
    }

    #[test]
    fn test_confirmation_toggle() {
        let mut proposal = Proposal::new(0, call_action());

        proposal.record_confirmation("alice");
        assert!(proposal.has_confirmed("alice"));
        assert!(!proposal.has_confirmed("bob"));

        proposal.clear_confirmation("alice");
        assert!(!proposal.has_confirmed("alice"));
    }

    #[test]
    fn test_governance_tag() {
        let action = ProposalAction::Governance(GovernanceAction::ChangeRequirement {
            required: 2,
        });
        assert!(action.is_governance());
    }
}
