//! Wallet notifications
//!
//! Fire-and-forget observability signals appended to the wallet's audit
//! log. State transitions are correct whether or not anyone reads them.

use crate::multisig::proposal::ProposalId;
use serde::{Deserialize, Serialize};

/// A notification emitted by the wallet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEvent {
    /// A proposal was created
    Submission { id: ProposalId },
    /// An owner confirmed a proposal
    Confirmation { owner: String, id: ProposalId },
    /// An owner retracted a confirmation
    Revocation { owner: String, id: ProposalId },
    /// A proposal executed successfully
    Execution { id: ProposalId },
    /// A proposal reached quorum but its action failed; it stays pending
    ExecutionFailure { id: ProposalId, reason: String },
    /// Governance added an owner
    OwnerAddition { owner: String },
    /// Governance removed an owner
    OwnerRemoval { owner: String },
    /// Governance changed the quorum threshold
    RequirementChange { required: usize },
}
