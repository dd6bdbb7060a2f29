//! JSON snapshot persistence for the custody state

pub mod persistence;

pub use persistence::{CustodyState, Storage, StorageConfig, StorageError};
