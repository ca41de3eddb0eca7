// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod card;
pub mod entity;
pub mod set;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Entity capability
pub use entity::{AllocatedId, Entity, EntityId, UNASSIGNED_ID};

// Card Domain
pub use card::{validate_card, Card, Condition, ImageSlot, Language};

// Set Domain
pub use set::{validate_set, CardSet};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
