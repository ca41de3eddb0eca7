// src/domain/entity.rs
//
// Capability shared by everything that lives in an entity container.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// Container-assigned numeric identifier.
pub type EntityId = i64;

/// Marks an entity that has not been added to a container yet.
pub const UNASSIGNED_ID: EntityId = -1;

/// A record with a unique identity inside its container and a natural order.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identity within the container.
    type Key: PartialEq + Clone + Debug + Display + Send + Sync;

    /// Tag written into the snapshot envelope; a file holding another kind is corrupt.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    fn natural_cmp(&self, other: &Self) -> Ordering;
}

/// Entities whose identity is allocated by the container and whose
/// natural order is ascending identifier order.
pub trait AllocatedId: Entity<Key = EntityId> {
    fn set_id(&mut self, id: EntityId);
}
