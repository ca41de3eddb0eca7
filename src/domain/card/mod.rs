pub mod entity;
pub mod invariants;

pub use entity::{Card, Condition, ImageSlot, Language};
pub use invariants::validate_card;
