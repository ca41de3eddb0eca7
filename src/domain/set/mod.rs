//! Critical Set Invariants:
//!
//! 1. A set is identified by its publisher-assigned code
//! 2. Sets are ordered by release date, not by any local identifier
//! 3. Code and name cannot be empty
//! 4. Sets carry no local-only data, so they can always be rebuilt from the source

pub mod entity;

pub use entity::CardSet;

use crate::domain::{DomainError, DomainResult};

/// Validates Set invariants
pub fn validate_set(set: &CardSet) -> DomainResult<()> {
    if set.code.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Set code cannot be empty".to_string(),
        ));
    }
    if set.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Set name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
