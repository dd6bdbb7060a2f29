//! Address blacklist registry
//!
//! A keyed boolean set with admin-gated mutation. Consulted by the
//! ledger call target before moving funds out of the wallet.

use crate::ledger::access::{AccessError, AdminGate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Blacklist errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlacklistError {
    #[error("access error: {0}")]
    Access(#[from] AccessError),
    #[error("already blacklisted: {0}")]
    AlreadyListed(String),
    #[error("not blacklisted: {0}")]
    NotListed(String),
    #[error("invalid identity: must not be empty")]
    NullIdentity,
}

/// Admin-gated set of blocked identities
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlacklistRegistry {
    entries: HashSet<String>,
    gate: AdminGate,
}

impl BlacklistRegistry {
    /// Create an empty registry administered by `admin`
    pub fn new(admin: impl Into<String>) -> Result<Self, BlacklistError> {
        Ok(Self {
            entries: HashSet::new(),
            gate: AdminGate::new(admin)?,
        })
    }

    /// Check whether an identity is blacklisted
    pub fn is_blacklisted(&self, identity: &str) -> bool {
        self.entries.contains(identity)
    }

    /// Number of blacklisted identities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an identity to the blacklist (admin-gated)
    pub fn add(&mut self, caller: &str, identity: &str) -> Result<(), BlacklistError> {
        self.gate.require(caller)?;
        if identity.is_empty() {
            return Err(BlacklistError::NullIdentity);
        }
        if !self.entries.insert(identity.to_string()) {
            return Err(BlacklistError::AlreadyListed(identity.to_string()));
        }
        log::info!("blacklisted {}", identity);
        Ok(())
    }

    /// Remove an identity from the blacklist (admin-gated)
    pub fn remove(&mut self, caller: &str, identity: &str) -> Result<(), BlacklistError> {
        self.gate.require(caller)?;
        if !self.entries.remove(identity) {
            return Err(BlacklistError::NotListed(identity.to_string()));
        }
        log::info!("un-blacklisted {}", identity);
        Ok(())
    }
}
