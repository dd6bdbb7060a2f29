//! Single-admin access gate
//!
//! Guards the peripheral registries (balance vault, blacklist). The
//! multisig core never uses this gate; it has its own owner set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access control errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("caller is not the admin: {0}")]
    NotAdmin(String),
    #[error("invalid admin: identity must not be empty")]
    NullAdmin,
}

/// A single-admin capability gate
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminGate {
    admin: String,
}

impl AdminGate {
    /// Create a gate held by the given admin
    pub fn new(admin: impl Into<String>) -> Result<Self, AccessError> {
        let admin = admin.into();
        if admin.is_empty() {
            return Err(AccessError::NullAdmin);
        }
        Ok(Self { admin })
    }

    /// Get the current admin identity
    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// Fail unless the caller is the current admin
    pub fn require(&self, caller: &str) -> Result<(), AccessError> {
        if caller != self.admin {
            return Err(AccessError::NotAdmin(caller.to_string()));
        }
        Ok(())
    }

    /// Hand the gate to a new admin (admin-gated)
    pub fn transfer_admin(
        &mut self,
        caller: &str,
        new_admin: impl Into<String>,
    ) -> Result<(), AccessError> {
        self.require(caller)?;
        let new_admin = new_admin.into();
        if new_admin.is_empty() {
            return Err(AccessError::NullAdmin);
        }
        log::info!("admin transferred from {} to {}", self.admin, new_admin);
        self.admin = new_admin;
        Ok(())
    }
}
