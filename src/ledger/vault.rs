//! Native currency balance vault
//!
//! A keyed balance table backing the custody wallet. Crediting new funds
//! is admin-gated; transfers are performed by the multisig engine through
//! [`LedgerTarget`] once a proposal reaches quorum.

use crate::ledger::access::{AccessError, AdminGate};
use crate::ledger::blacklist::BlacklistRegistry;
use crate::math::{self, MathError};
use crate::multisig::{CallError, CallTarget};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Maximum number of transfer records retained
const HISTORY_LIMIT: usize = 100;

/// Vault errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("access error: {0}")]
    Access(#[from] AccessError),
    #[error("arithmetic error: {0}")]
    Math(#[from] MathError),
    #[error("insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: u128, need: u128 },
    #[error("invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("invalid transfer: cannot transfer to self")]
    SelfTransfer,
}

/// A completed balance movement
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
    pub value: u128,
    pub timestamp: DateTime<Utc>,
}

/// Keyed balance table for native currency
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vault {
    /// Balances: identity -> amount
    balances: HashMap<String, u128>,
    gate: AdminGate,
    /// Transfer history (last 100)
    history: Vec<TransferRecord>,
}

impl Vault {
    /// Create an empty vault administered by `admin`
    pub fn new(admin: impl Into<String>) -> Result<Self, VaultError> {
        Ok(Self {
            balances: HashMap::new(),
            gate: AdminGate::new(admin)?,
            history: Vec::new(),
        })
    }

    /// Get the balance of an identity (0 if unknown)
    pub fn balance_of(&self, identity: &str) -> u128 {
        *self.balances.get(identity).unwrap_or(&0)
    }

    /// Recent transfers, oldest first
    pub fn history(&self) -> &[TransferRecord] {
        &self.history
    }

    /// Credit new funds to an account (admin-gated)
    pub fn credit(&mut self, caller: &str, to: &str, value: u128) -> Result<(), VaultError> {
        self.gate.require(caller)?;
        if value == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let balance = self.balance_of(to);
        let updated = math::checked_add(balance, value)?;
        self.balances.insert(to.to_string(), updated);
        log::info!("credited {} to {}", value, to);
        Ok(())
    }

    /// Move funds between accounts
    ///
    /// Fails with [`VaultError::InsufficientFunds`] when `value` exceeds
    /// the sender's balance.
    pub fn transfer(&mut self, from: &str, to: &str, value: u128) -> Result<(), VaultError> {
        if value == 0 {
            return Err(VaultError::InvalidAmount);
        }
        if from == to {
            return Err(VaultError::SelfTransfer);
        }

        let from_balance = self.balance_of(from);
        if from_balance < value {
            return Err(VaultError::InsufficientFunds {
                have: from_balance,
                need: value,
            });
        }

        let debited = math::checked_sub(from_balance, value)?;
        let credited = math::checked_add(self.balance_of(to), value)?;
        self.balances.insert(from.to_string(), debited);
        self.balances.insert(to.to_string(), credited);

        self.history.push(TransferRecord {
            from: from.to_string(),
            to: to.to_string(),
            value,
            timestamp: Utc::now(),
        });
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }

        log::info!("transferred {} from {} to {}", value, from, to);
        Ok(())
    }
}

/// Production call target for executed proposals
///
/// Moves a proposal's `value` out of the wallet's vault account, refusing
/// blacklisted destinations. The opaque payload is not interpreted here.
pub struct LedgerTarget<'a> {
    pub vault: &'a mut Vault,
    pub blacklist: &'a BlacklistRegistry,
    /// The wallet's own account in the vault
    pub wallet: &'a str,
}

impl CallTarget for LedgerTarget<'_> {
    fn call(&mut self, destination: &str, value: u128, _payload: &[u8]) -> Result<(), CallError> {
        if self.blacklist.is_blacklisted(destination) {
            return Err(CallError::new(format!(
                "destination {} is blacklisted",
                destination
            )));
        }
        if value > 0 {
            self.vault
                .transfer(self.wallet, destination, value)
                .map_err(|e| CallError::new(e.to_string()))?;
        }
        Ok(())
    }
}
