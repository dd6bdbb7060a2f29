//! Peripheral registries consumed by the custody wallet
//!
//! The balance vault and the blacklist are bookkeeping collaborators,
//! not part of the quorum state machine. Both are guarded by a
//! single-admin gate rather than the wallet's owner set.

pub mod access;
pub mod blacklist;
pub mod vault;

pub use access::{AccessError, AdminGate};
pub use blacklist::{BlacklistError, BlacklistRegistry};
pub use vault::{LedgerTarget, TransferRecord, Vault, VaultError};
