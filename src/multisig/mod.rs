//! Quorum-governed multi-signature custody
//!
//! An account controlled by a fixed set of owners where every
//! state-changing action requires a quorum of confirmations before it
//! executes. Ownership changes are themselves proposals, subject to the
//! same discipline.
//!
//! # Example
//!
//! ```ignore
//! use custody_wallet::multisig::{MultisigWallet, ProposalAction};
//!
//! // Create a 2-of-3 wallet
//! let mut wallet = MultisigWallet::new("vault", owners, 2)?;
//!
//! // Alice proposes a transfer (her confirmation is automatic)
//! let id = wallet.submit("alice", ProposalAction::Call {
//!     destination: recipient,
//!     value: 100,
//!     payload: vec![],
//! }, &mut target)?;
//!
//! // Bob's confirmation reaches quorum and executes the transfer
//! wallet.confirm("bob", id, &mut target)?;
//! ```

pub mod events;
pub mod proposal;
pub mod registry;
pub mod wallet;

pub use events::WalletEvent;
pub use proposal::{GovernanceAction, Proposal, ProposalAction, ProposalId};
pub use registry::{OwnerRegistry, RegistryError, MAX_OWNER_COUNT};
pub use wallet::{CallError, CallTarget, MultisigWallet, WalletError};
