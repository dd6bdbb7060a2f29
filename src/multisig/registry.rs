//! Owner registry and quorum threshold
//!
//! The set of identities whose confirmations count toward quorum.
//! Mutators are crate-private: the only path to them is the execution of
//! a governance proposal that itself reached quorum.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Hard cap on the number of owners
pub const MAX_OWNER_COUNT: usize = 50;

/// Owner registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid identity: must not be empty")]
    NullIdentity,
    #[error("duplicate owner: {0}")]
    DuplicateOwner(String),
    #[error("not an owner: {0}")]
    UnknownOwner(String),
    #[error("owner count {0} exceeds maximum of {MAX_OWNER_COUNT}")]
    TooManyOwners(usize),
    #[error("invalid requirement: {required} of {owners} owners")]
    InvalidRequirement { required: usize, owners: usize },
}

/// The authorized owner set and its confirmation threshold
///
/// Invariant: `0 < required <= owners.len() <= MAX_OWNER_COUNT`, and
/// `is_owner` mirrors `owners` exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnerRegistry {
    /// Owners in insertion order (order preserved for deterministic
    /// iteration; it carries no semantic weight)
    owners: Vec<String>,
    /// Derived membership view over `owners`
    is_owner: HashSet<String>,
    /// Confirmations needed before a proposal executes
    required: usize,
}

impl OwnerRegistry {
    /// Create a registry from an initial owner list and threshold
    pub fn new(owners: Vec<String>, required: usize) -> Result<Self, RegistryError> {
        Self::check_requirement(required, owners.len())?;

        let mut is_owner = HashSet::new();
        for owner in &owners {
            if owner.is_empty() {
                return Err(RegistryError::NullIdentity);
            }
            if !is_owner.insert(owner.clone()) {
                return Err(RegistryError::DuplicateOwner(owner.clone()));
            }
        }

        Ok(Self {
            owners,
            is_owner,
            required,
        })
    }

    /// Owners in registry order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Current quorum threshold
    pub fn required(&self) -> usize {
        self.required
    }

    /// Number of owners
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether the registry has no owners (never true for a live wallet)
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Check whether an identity is a current owner
    pub fn contains(&self, identity: &str) -> bool {
        self.is_owner.contains(identity)
    }

    /// Validate a (required, owner count) pair against the invariant
    fn check_requirement(required: usize, owners: usize) -> Result<(), RegistryError> {
        if owners > MAX_OWNER_COUNT {
            return Err(RegistryError::TooManyOwners(owners));
        }
        if required == 0 || required > owners {
            return Err(RegistryError::InvalidRequirement { required, owners });
        }
        Ok(())
    }

    /// Append a new owner
    pub(crate) fn add_owner(&mut self, identity: &str) -> Result<(), RegistryError> {
        if identity.is_empty() {
            return Err(RegistryError::NullIdentity);
        }
        if self.is_owner.contains(identity) {
            return Err(RegistryError::DuplicateOwner(identity.to_string()));
        }
        if self.owners.len() + 1 > MAX_OWNER_COUNT {
            return Err(RegistryError::TooManyOwners(self.owners.len() + 1));
        }

        self.owners.push(identity.to_string());
        self.is_owner.insert(identity.to_string());
        Ok(())
    }

    /// Remove an owner, clamping the threshold if it now exceeds the
    /// owner count
    ///
    /// Returns `true` when the threshold was clamped. Removal is
    /// swap-and-truncate; order among remaining owners may change.
    pub(crate) fn remove_owner(&mut self, identity: &str) -> Result<bool, RegistryError> {
        let position = self
            .owners
            .iter()
            .position(|o| o == identity)
            .ok_or_else(|| RegistryError::UnknownOwner(identity.to_string()))?;

        // The owner set must never empty: no threshold satisfies
        // 0 < required <= 0
        if self.owners.len() == 1 {
            return Err(RegistryError::InvalidRequirement {
                required: self.required,
                owners: 0,
            });
        }

        self.owners.swap_remove(position);
        self.is_owner.remove(identity);

        if self.required > self.owners.len() {
            self.required = self.owners.len();
            return Ok(true);
        }
        Ok(false)
    }

    /// Atomically swap one owner for another, preserving position
    pub(crate) fn replace_owner(&mut self, old: &str, new: &str) -> Result<(), RegistryError> {
        if new.is_empty() {
            return Err(RegistryError::NullIdentity);
        }
        if self.is_owner.contains(new) {
            return Err(RegistryError::DuplicateOwner(new.to_string()));
        }
        let position = self
            .owners
            .iter()
            .position(|o| o == old)
            .ok_or_else(|| RegistryError::UnknownOwner(old.to_string()))?;

        self.owners[position] = new.to_string();
        self.is_owner.remove(old);
        self.is_owner.insert(new.to_string());
        Ok(())
    }

    /// Set a new quorum threshold
    pub(crate) fn change_requirement(&mut self, required: usize) -> Result<(), RegistryError> {
        Self::check_requirement(required, self.owners.len())?;
        self.required = required;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_registry(required: usize) -> OwnerRegistry {
        OwnerRegistry::new(
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            required,
        )
        .unwrap()
    }

    #[test]
    fn test_creation() {
        let registry = abc_registry(2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.required(), 2);
        assert!(registry.contains("alice"));
        assert!(!registry.contains("mallory"));
        assert_eq!(registry.owners(), &["alice", "bob", "carol"]);
    }

    #[test]
    fn test_creation_validation() {
        // Zero threshold
        assert!(OwnerRegistry::new(vec!["a".to_string()], 0).is_err());

        // Threshold exceeds owner count
        assert!(OwnerRegistry::new(vec!["a".to_string()], 2).is_err());

        // Empty owner list
        assert!(OwnerRegistry::new(vec![], 1).is_err());

        // Duplicate owner
        let result = OwnerRegistry::new(vec!["a".to_string(), "a".to_string()], 1);
        assert!(matches!(result, Err(RegistryError::DuplicateOwner(_))));

        // Empty identity
        let result = OwnerRegistry::new(vec!["".to_string()], 1);
        assert!(matches!(result, Err(RegistryError::NullIdentity)));

        // Too many owners
        let many: Vec<String> = (0..MAX_OWNER_COUNT + 1).map(|i| format!("o{}", i)).collect();
        let result = OwnerRegistry::new(many, 1);
        assert!(matches!(result, Err(RegistryError::TooManyOwners(_))));
    }

    #[test]
    fn test_add_owner() {
        let mut registry = abc_registry(2);

        registry.add_owner("dave").unwrap();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("dave"));

        let result = registry.add_owner("dave");
        assert!(matches!(result, Err(RegistryError::DuplicateOwner(_))));
    }

    #[test]
    fn test_add_owner_respects_cap() {
        let owners: Vec<String> = (0..MAX_OWNER_COUNT).map(|i| format!("o{}", i)).collect();
        let mut registry = OwnerRegistry::new(owners, 1).unwrap();

        let result = registry.add_owner("one_too_many");
        assert!(matches!(result, Err(RegistryError::TooManyOwners(_))));
    }

    #[test]
    fn test_remove_owner() {
        let mut registry = abc_registry(2);

        let clamped = registry.remove_owner("bob").unwrap();
        assert!(!clamped);
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("bob"));

        let result = registry.remove_owner("bob");
        assert!(matches!(result, Err(RegistryError::UnknownOwner(_))));
    }

    #[test]
    fn test_remove_last_owner_rejected() {
        let mut registry = OwnerRegistry::new(vec!["alice".to_string()], 1).unwrap();

        let result = registry.remove_owner("alice");
        assert!(matches!(
            result,
            Err(RegistryError::InvalidRequirement { owners: 0, .. })
        ));
        assert!(registry.contains("alice"));
        assert_eq!(registry.required(), 1);
    }

    #[test]
    fn test_remove_owner_clamps_requirement() {
        let mut registry = abc_registry(3);

        let clamped = registry.remove_owner("carol").unwrap();
        assert!(clamped);
        assert_eq!(registry.required(), 2);
    }

    #[test]
    fn test_replace_owner() {
        let mut registry = abc_registry(2);

        registry.replace_owner("bob", "dave").unwrap();
        assert!(!registry.contains("bob"));
        assert!(registry.contains("dave"));
        // Position is preserved on replace
        assert_eq!(registry.owners(), &["alice", "dave", "carol"]);

        assert!(matches!(
            registry.replace_owner("bob", "erin"),
            Err(RegistryError::UnknownOwner(_))
        ));
        assert!(matches!(
            registry.replace_owner("alice", "dave"),
            Err(RegistryError::DuplicateOwner(_))
        ));
    }

    #[test]
    fn test_change_requirement() {
        let mut registry = abc_registry(2);

        registry.change_requirement(3).unwrap();
        assert_eq!(registry.required(), 3);

        assert!(matches!(
            registry.change_requirement(0),
            Err(RegistryError::InvalidRequirement { .. })
        ));
        assert!(matches!(
            registry.change_requirement(4),
            Err(RegistryError::InvalidRequirement { .. })
        ));
    }
}
