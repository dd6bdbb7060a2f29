//! Custody-Wallet: a quorum-governed multi-signature custody wallet
//!
//! This crate provides a multi-signature custody account featuring:
//! - A proposal / confirmation / execution state machine with
//!   per-proposal confirmation sets and live quorum evaluation
//! - Self-amending governance: owner additions, removals, replacements
//!   and threshold changes go through the same quorum discipline
//! - A permanent, append-only proposal table for audit
//! - Peripheral balance vault and blacklist registries behind a
//!   single-admin gate
//! - Checked arithmetic helpers that fail instead of wrapping
//! - JSON snapshot persistence for the bundled CLI
//!
//! # Example
//!
//! ```rust
//! use custody_wallet::multisig::{MultisigWallet, ProposalAction};
//! use custody_wallet::ledger::{BlacklistRegistry, LedgerTarget, Vault};
//!
//! let owners = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
//! let mut wallet = MultisigWallet::new("wallet", owners, 2).unwrap();
//!
//! let mut vault = Vault::new("admin").unwrap();
//! vault.credit("admin", "wallet", 1_000).unwrap();
//! let blacklist = BlacklistRegistry::new("admin").unwrap();
//!
//! let mut target = LedgerTarget {
//!     vault: &mut vault,
//!     blacklist: &blacklist,
//!     wallet: "wallet",
//! };
//!
//! // Alice proposes a transfer; her confirmation is automatic
//! let id = wallet
//!     .submit("alice", ProposalAction::Call {
//!         destination: "dave".to_string(),
//!         value: 250,
//!         payload: vec![],
//!     }, &mut target)
//!     .unwrap();
//!
//! // Bob's confirmation reaches quorum and the transfer executes
//! wallet.confirm("bob", id, &mut target).unwrap();
//! assert!(wallet.proposal(id).unwrap().executed);
//! assert_eq!(vault.balance_of("dave"), 250);
//! ```

pub mod cli;
pub mod ledger;
pub mod math;
pub mod multisig;
pub mod storage;

// Re-export commonly used types
pub use ledger::{AdminGate, BlacklistRegistry, LedgerTarget, Vault};
pub use multisig::{
    CallError, CallTarget, GovernanceAction, MultisigWallet, Proposal, ProposalAction, ProposalId,
    WalletError, WalletEvent, MAX_OWNER_COUNT,
};
pub use storage::{CustodyState, Storage, StorageConfig};
