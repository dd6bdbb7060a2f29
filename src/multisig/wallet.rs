//! Multi-signature custody wallet engine
//!
//! Holds the owner registry and the proposal table, and drives the
//! proposal / confirmation / execution state machine. Every operation is
//! applied atomically: a precondition failure aborts the call with no
//! state change.

use crate::multisig::events::WalletEvent;
use crate::multisig::proposal::{GovernanceAction, Proposal, ProposalAction, ProposalId};
use crate::multisig::registry::{OwnerRegistry, RegistryError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wallet operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("caller is not an owner: {0}")]
    NotOwner(String),
    #[error("invalid identity: must not be empty")]
    NullIdentity,
    #[error("proposal not found: {0}")]
    ProposalNotFound(ProposalId),
    #[error("proposal {id} already confirmed by {owner}")]
    AlreadyConfirmed { owner: String, id: ProposalId },
    #[error("proposal {id} not confirmed by {owner}")]
    NotConfirmed { owner: String, id: ProposalId },
    #[error("proposal already executed: {0}")]
    AlreadyExecuted(ProposalId),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Failure of the downstream call performed by an executing proposal
///
/// The one error class that is not fatal to future progress: the
/// proposal stays pending and may be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CallError(String);

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Destination of an executed external-call proposal
///
/// The wallet never interprets the payload; implementors decide what a
/// call means. The production implementor is the ledger vault.
pub trait CallTarget {
    fn call(&mut self, destination: &str, value: u128, payload: &[u8]) -> Result<(), CallError>;
}

/// A quorum-governed custody wallet
///
/// The single context object for the whole ledger: owner registry,
/// proposal table and audit log. Callers pass it `&mut` to every
/// operation; concurrent embedders wrap it in one lock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigWallet {
    /// The wallet's own account identity in the balance ledger
    address: String,
    registry: OwnerRegistry,
    /// Proposals indexed by id; never shrinks, ids never reused
    proposals: Vec<Proposal>,
    /// Audit log of every notification emitted
    events: Vec<WalletEvent>,
}

impl MultisigWallet {
    /// Create a wallet from an initial owner list and quorum threshold
    pub fn new(
        address: impl Into<String>,
        owners: Vec<String>,
        required: usize,
    ) -> Result<Self, WalletError> {
        let address = address.into();
        if address.is_empty() {
            return Err(WalletError::NullIdentity);
        }
        Ok(Self {
            address,
            registry: OwnerRegistry::new(owners, required)?,
            proposals: Vec::new(),
            events: Vec::new(),
        })
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// The wallet's own account identity
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Current owners in registry order
    pub fn owners(&self) -> &[String] {
        self.registry.owners()
    }

    /// Current quorum threshold
    pub fn required(&self) -> usize {
        self.registry.required()
    }

    /// Check whether an identity is a current owner
    pub fn is_owner(&self, identity: &str) -> bool {
        self.registry.contains(identity)
    }

    /// Look up a proposal by id
    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, WalletError> {
        self.proposals
            .get(id as usize)
            .ok_or(WalletError::ProposalNotFound(id))
    }

    /// Every notification emitted so far, oldest first
    pub fn events(&self) -> &[WalletEvent] {
        &self.events
    }

    /// Whether a proposal currently meets quorum
    ///
    /// Recomputed fresh on every call: the recorded confirmer set is
    /// joined against the live owner registry, so owner removals and
    /// threshold changes take effect immediately. Iterates owners in
    /// registry order and short-circuits once quorum is reached.
    pub fn is_confirmed(&self, id: ProposalId) -> Result<bool, WalletError> {
        let proposal = self.proposal(id)?;
        let mut count = 0;
        for owner in self.registry.owners() {
            if proposal.has_confirmed(owner) {
                count += 1;
                if count >= self.registry.required() {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Count of CURRENT owners with a confirmation on record
    pub fn confirmation_count(&self, id: ProposalId) -> Result<usize, WalletError> {
        Ok(self.confirmations(id)?.len())
    }

    /// Current owners with a confirmation on record, in registry order
    pub fn confirmations(&self, id: ProposalId) -> Result<Vec<String>, WalletError> {
        let proposal = self.proposal(id)?;
        Ok(self
            .registry
            .owners()
            .iter()
            .filter(|owner| proposal.has_confirmed(owner))
            .cloned()
            .collect())
    }

    /// Count proposals matching the execution-status filter
    pub fn transaction_count(&self, include_pending: bool, include_executed: bool) -> usize {
        self.proposals
            .iter()
            .filter(|p| Self::matches_filter(p, include_pending, include_executed))
            .count()
    }

    /// Ids of proposals matching the filter, ascending, sliced `[from, to)`
    ///
    /// `to` is clamped to the filtered length and `from >= to` yields an
    /// empty list; the query never fails.
    pub fn transaction_ids(
        &self,
        from: usize,
        to: usize,
        include_pending: bool,
        include_executed: bool,
    ) -> Vec<ProposalId> {
        let filtered: Vec<ProposalId> = self
            .proposals
            .iter()
            .filter(|p| Self::matches_filter(p, include_pending, include_executed))
            .map(|p| p.id)
            .collect();

        let to = to.min(filtered.len());
        if from >= to {
            return Vec::new();
        }
        filtered[from..to].to_vec()
    }

    fn matches_filter(proposal: &Proposal, include_pending: bool, include_executed: bool) -> bool {
        (include_pending && !proposal.executed) || (include_executed && proposal.executed)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Submit a new proposal and auto-confirm it for the submitter
    ///
    /// Returns the fresh proposal id. If the submitter's confirmation
    /// alone meets quorum (`required == 1`), the proposal executes
    /// immediately.
    pub fn submit(
        &mut self,
        caller: &str,
        action: ProposalAction,
        target: &mut dyn CallTarget,
    ) -> Result<ProposalId, WalletError> {
        self.require_owner(caller)?;
        Self::check_action(&action)?;

        let id = self.proposals.len() as ProposalId;
        self.proposals.push(Proposal::new(id, action));
        self.emit(WalletEvent::Submission { id });
        log::info!("proposal {} submitted by {}", id, caller);

        // The submitter's approval is automatic and counted
        self.confirm(caller, id, target)?;
        Ok(id)
    }

    /// Confirm a pending proposal
    ///
    /// Re-evaluates quorum afterward and executes if met. Confirming an
    /// already-executed proposal is a state conflict and fails.
    pub fn confirm(
        &mut self,
        caller: &str,
        id: ProposalId,
        target: &mut dyn CallTarget,
    ) -> Result<(), WalletError> {
        self.require_owner(caller)?;
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(WalletError::ProposalNotFound(id))?;
        if proposal.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }
        if proposal.has_confirmed(caller) {
            return Err(WalletError::AlreadyConfirmed {
                owner: caller.to_string(),
                id,
            });
        }

        proposal.record_confirmation(caller);
        self.emit(WalletEvent::Confirmation {
            owner: caller.to_string(),
            id,
        });
        log::info!("proposal {} confirmed by {}", id, caller);

        self.try_execute(id, target);
        Ok(())
    }

    /// Retract a confirmation from a not-yet-executed proposal
    pub fn revoke(&mut self, caller: &str, id: ProposalId) -> Result<(), WalletError> {
        self.require_owner(caller)?;
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(WalletError::ProposalNotFound(id))?;
        if proposal.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }
        if !proposal.has_confirmed(caller) {
            return Err(WalletError::NotConfirmed {
                owner: caller.to_string(),
                id,
            });
        }

        proposal.clear_confirmation(caller);
        self.emit(WalletEvent::Revocation {
            owner: caller.to_string(),
            id,
        });
        log::info!("proposal {} confirmation revoked by {}", id, caller);
        Ok(())
    }

    /// Attempt to execute a pending proposal
    ///
    /// A no-op when quorum is not met. Useful for retrying after a
    /// downstream failure (more funds arrived, requirement lowered) —
    /// quorum is recomputed fresh, never cached.
    pub fn execute(
        &mut self,
        id: ProposalId,
        target: &mut dyn CallTarget,
    ) -> Result<(), WalletError> {
        let proposal = self.proposal(id)?;
        if proposal.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }
        self.try_execute(id, target);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_owner(&self, caller: &str) -> Result<(), WalletError> {
        if !self.registry.contains(caller) {
            return Err(WalletError::NotOwner(caller.to_string()));
        }
        Ok(())
    }

    /// Validity checks applied at submission time
    fn check_action(action: &ProposalAction) -> Result<(), WalletError> {
        let identities: Vec<&str> = match action {
            ProposalAction::Call { destination, .. } => vec![destination.as_str()],
            ProposalAction::Governance(g) => match g {
                GovernanceAction::AddOwner { identity }
                | GovernanceAction::RemoveOwner { identity } => vec![identity.as_str()],
                GovernanceAction::ReplaceOwner { old, new } => {
                    vec![old.as_str(), new.as_str()]
                }
                GovernanceAction::ChangeRequirement { .. } => vec![],
            },
        };
        if identities.iter().any(|i| i.is_empty()) {
            return Err(WalletError::NullIdentity);
        }
        Ok(())
    }

    /// Execute the proposal if it meets quorum; otherwise do nothing
    ///
    /// Downstream failures (external call or governance dispatch) emit
    /// `ExecutionFailure` and leave the proposal pending and retryable.
    fn try_execute(&mut self, id: ProposalId, target: &mut dyn CallTarget) {
        match self.is_confirmed(id) {
            Ok(true) => {}
            _ => return,
        }

        let action = self.proposals[id as usize].action.clone();
        let outcome = match &action {
            ProposalAction::Call {
                destination,
                value,
                payload,
            } => target.call(destination, *value, payload),
            ProposalAction::Governance(governance) => self
                .apply_governance(governance)
                .map_err(|e| CallError::new(e.to_string())),
        };

        match outcome {
            Ok(()) => {
                let proposal = &mut self.proposals[id as usize];
                proposal.executed = true;
                proposal.executed_at = Some(Utc::now());
                self.emit(WalletEvent::Execution { id });
                log::info!("proposal {} executed", id);
            }
            Err(e) => {
                self.emit(WalletEvent::ExecutionFailure {
                    id,
                    reason: e.to_string(),
                });
                log::warn!("proposal {} execution failed: {}", id, e);
            }
        }
    }

    /// Dispatch a governance action against the owner registry
    ///
    /// Only reachable from `try_execute`, which is the redesigned
    /// equivalent of "caller is the wallet itself": ownership changes go
    /// through the same quorum discipline as fund transfers.
    fn apply_governance(&mut self, action: &GovernanceAction) -> Result<(), RegistryError> {
        match action {
            GovernanceAction::AddOwner { identity } => {
                self.registry.add_owner(identity)?;
                self.emit(WalletEvent::OwnerAddition {
                    owner: identity.clone(),
                });
            }
            GovernanceAction::RemoveOwner { identity } => {
                let clamped = self.registry.remove_owner(identity)?;
                self.emit(WalletEvent::OwnerRemoval {
                    owner: identity.clone(),
                });
                if clamped {
                    self.emit(WalletEvent::RequirementChange {
                        required: self.registry.required(),
                    });
                }
            }
            GovernanceAction::ReplaceOwner { old, new } => {
                self.registry.replace_owner(old, new)?;
                self.emit(WalletEvent::OwnerRemoval { owner: old.clone() });
                self.emit(WalletEvent::OwnerAddition { owner: new.clone() });
            }
            GovernanceAction::ChangeRequirement { required } => {
                self.registry.change_requirement(*required)?;
                self.emit(WalletEvent::RequirementChange {
                    required: *required,
                });
            }
        }
        Ok(())
    }

    fn emit(&mut self, event: WalletEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Call target that records calls and can be told to fail
    struct RecordingTarget {
        calls: Vec<(String, u128, Vec<u8>)>,
        fail: bool,
    }

    impl RecordingTarget {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Vec::new(),
                fail: true,
            }
        }
    }

    impl CallTarget for RecordingTarget {
        fn call(
            &mut self,
            destination: &str,
            value: u128,
            payload: &[u8],
        ) -> Result<(), CallError> {
            if self.fail {
                return Err(CallError::new("downstream call failed"));
            }
            self.calls
                .push((destination.to_string(), value, payload.to_vec()));
            Ok(())
        }
    }

    fn abc_wallet(required: usize) -> MultisigWallet {
        MultisigWallet::new(
            "wallet",
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            required,
        )
        .unwrap()
    }

    fn transfer_action(destination: &str, value: u128) -> ProposalAction {
        ProposalAction::Call {
            destination: destination.to_string(),
            value,
            payload: vec![],
        }
    }

    #[test]
    fn test_submit_auto_confirms_submitter() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();

        assert_eq!(id, 0);
        assert_eq!(wallet.confirmation_count(id).unwrap(), 1);
        assert_eq!(wallet.confirmations(id).unwrap(), vec!["alice"]);
        assert!(!wallet.proposal(id).unwrap().executed);
        assert!(target.calls.is_empty());

        // Submission then confirmation, in that order
        assert_eq!(
            wallet.events(),
            &[
                WalletEvent::Submission { id: 0 },
                WalletEvent::Confirmation {
                    owner: "alice".to_string(),
                    id: 0
                },
            ]
        );
    }

    #[test]
    fn test_submit_rejects_non_owner() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let result = wallet.submit("mallory", transfer_action("dest", 100), &mut target);
        assert!(matches!(result, Err(WalletError::NotOwner(_))));
        assert_eq!(wallet.transaction_count(true, true), 0);
    }

    #[test]
    fn test_submit_rejects_null_destination() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let result = wallet.submit("alice", transfer_action("", 100), &mut target);
        assert!(matches!(result, Err(WalletError::NullIdentity)));
    }

    #[test]
    fn test_quorum_executes_on_second_confirmation() {
        // owners = {A, B, C}, required = 2
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();
        assert!(!wallet.is_confirmed(id).unwrap());

        wallet.confirm("bob", id, &mut target).unwrap();
        assert_eq!(wallet.confirmation_count(id).unwrap(), 2);
        assert!(wallet.proposal(id).unwrap().executed);
        assert!(wallet.proposal(id).unwrap().executed_at.is_some());
        assert_eq!(target.calls, vec![("dest".to_string(), 100, vec![])]);
        assert!(wallet.events().contains(&WalletEvent::Execution { id }));

        // Confirming an executed proposal is a state conflict
        let result = wallet.confirm("carol", id, &mut target);
        assert!(matches!(result, Err(WalletError::AlreadyExecuted(0))));
        assert_eq!(wallet.confirmation_count(id).unwrap(), 2);
    }

    #[test]
    fn test_required_one_executes_on_submit() {
        let mut wallet = abc_wallet(1);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 5), &mut target)
            .unwrap();
        assert!(wallet.proposal(id).unwrap().executed);
        assert_eq!(target.calls.len(), 1);
    }

    #[test]
    fn test_double_confirm_rejected() {
        let mut wallet = abc_wallet(3);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();

        let result = wallet.confirm("alice", id, &mut target);
        assert!(matches!(result, Err(WalletError::AlreadyConfirmed { .. })));
        assert_eq!(wallet.confirmation_count(id).unwrap(), 1);
    }

    #[test]
    fn test_confirm_unknown_proposal() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let result = wallet.confirm("alice", 7, &mut target);
        assert!(matches!(result, Err(WalletError::ProposalNotFound(7))));
    }

    #[test]
    fn test_revoke() {
        let mut wallet = abc_wallet(3);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();
        wallet.confirm("bob", id, &mut target).unwrap();
        assert_eq!(wallet.confirmation_count(id).unwrap(), 2);

        wallet.revoke("bob", id).unwrap();
        assert_eq!(wallet.confirmation_count(id).unwrap(), 1);
        assert!(wallet.events().contains(&WalletEvent::Revocation {
            owner: "bob".to_string(),
            id,
        }));

        // Revoking without a confirmation on record fails
        let result = wallet.revoke("carol", id);
        assert!(matches!(result, Err(WalletError::NotConfirmed { .. })));
    }

    #[test]
    fn test_revoke_after_execution_rejected() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();
        wallet.confirm("bob", id, &mut target).unwrap();

        let result = wallet.revoke("alice", id);
        assert!(matches!(result, Err(WalletError::AlreadyExecuted(0))));
    }

    #[test]
    fn test_execution_failure_keeps_proposal_pending() {
        let mut wallet = abc_wallet(2);
        let mut failing = RecordingTarget::failing();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut failing)
            .unwrap();
        wallet.confirm("bob", id, &mut failing).unwrap();

        // Quorum was met but the call failed: not executed, retryable
        assert!(!wallet.proposal(id).unwrap().executed);
        assert!(wallet
            .events()
            .iter()
            .any(|e| matches!(e, WalletEvent::ExecutionFailure { id: 0, .. })));

        // Retry with a working target succeeds
        let mut working = RecordingTarget::new();
        wallet.execute(id, &mut working).unwrap();
        assert!(wallet.proposal(id).unwrap().executed);
        assert_eq!(working.calls.len(), 1);

        // A second execute on the now-executed proposal fails
        let result = wallet.execute(id, &mut working);
        assert!(matches!(result, Err(WalletError::AlreadyExecuted(0))));
    }

    #[test]
    fn test_execute_below_quorum_is_noop() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();

        wallet.execute(id, &mut target).unwrap();
        assert!(!wallet.proposal(id).unwrap().executed);
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_governance_add_owner() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::AddOwner {
                    identity: "dave".to_string(),
                }),
                &mut target,
            )
            .unwrap();

        // Not yet: quorum is 2
        assert!(!wallet.is_owner("dave"));

        wallet.confirm("bob", id, &mut target).unwrap();
        assert!(wallet.is_owner("dave"));
        assert_eq!(wallet.owners().len(), 4);
        assert!(wallet.events().contains(&WalletEvent::OwnerAddition {
            owner: "dave".to_string(),
        }));
        // No external call is made for governance
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_governance_remove_owner_clamps_requirement() {
        // owners = {A, B, C}, required = 3: removing C needs all three
        let mut wallet = abc_wallet(3);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::RemoveOwner {
                    identity: "carol".to_string(),
                }),
                &mut target,
            )
            .unwrap();
        wallet.confirm("bob", id, &mut target).unwrap();
        assert!(wallet.is_owner("carol"));

        wallet.confirm("carol", id, &mut target).unwrap();
        assert!(!wallet.is_owner("carol"));
        assert_eq!(wallet.owners().len(), 2);
        // required auto-clamps from 3 to 2
        assert_eq!(wallet.required(), 2);
        assert!(wallet
            .events()
            .contains(&WalletEvent::RequirementChange { required: 2 }));
    }

    #[test]
    fn test_governance_replace_owner() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::ReplaceOwner {
                    old: "carol".to_string(),
                    new: "dave".to_string(),
                }),
                &mut target,
            )
            .unwrap();
        wallet.confirm("bob", id, &mut target).unwrap();

        assert!(!wallet.is_owner("carol"));
        assert!(wallet.is_owner("dave"));
        assert_eq!(wallet.owners().len(), 3);
        // Removal notification, then addition
        let events = wallet.events();
        let removal = events
            .iter()
            .position(|e| {
                *e == WalletEvent::OwnerRemoval {
                    owner: "carol".to_string(),
                }
            })
            .unwrap();
        let addition = events
            .iter()
            .position(|e| {
                *e == WalletEvent::OwnerAddition {
                    owner: "dave".to_string(),
                }
            })
            .unwrap();
        assert!(removal < addition);
    }

    #[test]
    fn test_governance_failure_is_retryable() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        // Adding an existing owner fails at execution time
        let id = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::AddOwner {
                    identity: "bob".to_string(),
                }),
                &mut target,
            )
            .unwrap();
        wallet.confirm("bob", id, &mut target).unwrap();

        assert!(!wallet.proposal(id).unwrap().executed);
        assert!(wallet
            .events()
            .iter()
            .any(|e| matches!(e, WalletEvent::ExecutionFailure { id: 0, .. })));
        assert_eq!(wallet.owners().len(), 3);
    }

    #[test]
    fn test_governance_cannot_remove_last_owner() {
        let mut wallet =
            MultisigWallet::new("wallet", vec!["alice".to_string()], 1).unwrap();
        let mut target = RecordingTarget::new();

        // Quorum of 1: the governance proposal dispatches on submit
        let id = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::RemoveOwner {
                    identity: "alice".to_string(),
                }),
                &mut target,
            )
            .unwrap();

        // Dispatch fails; the owner set and threshold are untouched
        assert!(!wallet.proposal(id).unwrap().executed);
        assert!(wallet
            .events()
            .iter()
            .any(|e| matches!(e, WalletEvent::ExecutionFailure { id: 0, .. })));
        assert!(wallet.is_owner("alice"));
        assert_eq!(wallet.required(), 1);
    }

    #[test]
    fn test_removed_owner_confirmation_no_longer_counts() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        // Carol confirms a pending transfer that stays below quorum
        let transfer = wallet
            .submit("carol", transfer_action("dest", 100), &mut target)
            .unwrap();
        assert_eq!(wallet.confirmation_count(transfer).unwrap(), 1);

        // Governance removes carol
        let removal = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::RemoveOwner {
                    identity: "carol".to_string(),
                }),
                &mut target,
            )
            .unwrap();
        wallet.confirm("bob", removal, &mut target).unwrap();
        assert!(!wallet.is_owner("carol"));

        // Carol's recorded confirmation no longer counts toward quorum
        assert_eq!(wallet.confirmation_count(transfer).unwrap(), 0);
        assert!(wallet.proposal(transfer).unwrap().has_confirmed("carol"));
        assert!(!wallet.is_confirmed(transfer).unwrap());
    }

    #[test]
    fn test_requirement_reduction_unblocks_pending_proposal() {
        let mut wallet = abc_wallet(3);
        let mut target = RecordingTarget::new();

        // Two of three confirmations: below quorum
        let transfer = wallet
            .submit("alice", transfer_action("dest", 100), &mut target)
            .unwrap();
        wallet.confirm("bob", transfer, &mut target).unwrap();
        assert!(!wallet.proposal(transfer).unwrap().executed);

        // Governance lowers the requirement to 2 (needs all 3 votes itself)
        let change = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::ChangeRequirement { required: 2 }),
                &mut target,
            )
            .unwrap();
        wallet.confirm("bob", change, &mut target).unwrap();
        wallet.confirm("carol", change, &mut target).unwrap();
        assert_eq!(wallet.required(), 2);

        // The earlier proposal now meets quorum on the next execute call
        assert!(wallet.is_confirmed(transfer).unwrap());
        wallet.execute(transfer, &mut target).unwrap();
        assert!(wallet.proposal(transfer).unwrap().executed);
    }

    #[test]
    fn test_governance_requires_quorum_like_transfers() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit(
                "alice",
                ProposalAction::Governance(GovernanceAction::ChangeRequirement { required: 1 }),
                &mut target,
            )
            .unwrap();

        // One confirmation is not enough; nothing changed
        assert_eq!(wallet.required(), 2);
        assert!(!wallet.proposal(id).unwrap().executed);
    }

    #[test]
    fn test_transaction_ids_filtering_and_slicing() {
        let mut wallet = abc_wallet(2);
        let mut target = RecordingTarget::new();

        // id 0 executes; ids 1..=3 stay pending
        let executed = wallet
            .submit("alice", transfer_action("dest", 1), &mut target)
            .unwrap();
        wallet.confirm("bob", executed, &mut target).unwrap();
        for _ in 0..3 {
            wallet
                .submit("alice", transfer_action("dest", 1), &mut target)
                .unwrap();
        }

        // First two pending ids, ascending
        assert_eq!(wallet.transaction_ids(0, 2, true, false), vec![1, 2]);
        assert_eq!(wallet.transaction_ids(0, 10, false, true), vec![0]);
        assert_eq!(wallet.transaction_ids(0, 10, true, true), vec![0, 1, 2, 3]);
        assert_eq!(wallet.transaction_count(true, false), 3);
        assert_eq!(wallet.transaction_count(false, true), 1);

        // Out-of-range `to` clamps; inverted ranges yield empty
        assert_eq!(wallet.transaction_ids(1, 100, true, false), vec![2, 3]);
        assert!(wallet.transaction_ids(5, 2, true, true).is_empty());
        assert!(wallet.transaction_ids(0, 10, false, false).is_empty());
    }

    #[test]
    fn test_is_confirmed_matches_count_against_required() {
        let mut wallet = abc_wallet(3);
        let mut target = RecordingTarget::new();

        let id = wallet
            .submit("alice", transfer_action("dest", 1), &mut target)
            .unwrap();
        assert!(!wallet.is_confirmed(id).unwrap());
        wallet.confirm("bob", id, &mut target).unwrap();
        assert!(!wallet.is_confirmed(id).unwrap());
        wallet.confirm("carol", id, &mut target).unwrap();
        assert_eq!(wallet.confirmation_count(id).unwrap(), 3);
        assert!(wallet.is_confirmed(id).unwrap());
    }

    #[test]
    fn test_wallet_construction_validation() {
        assert!(MultisigWallet::new("wallet", vec!["a".to_string()], 0).is_err());
        assert!(MultisigWallet::new("", vec!["a".to_string()], 1).is_err());
    }
}
