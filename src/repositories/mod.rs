// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB containers over a snapshot file
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls

pub mod card_repository;
pub mod entity_container;
pub mod set_repository;

pub use card_repository::{CardRepository, FileCardRepository};
pub use entity_container::{ContainerOrigin, EntityContainer};
pub use set_repository::{FileSetRepository, SetRepository};
