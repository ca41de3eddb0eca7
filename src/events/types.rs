// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CardSet, EntityId};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// CARD EVENTS
// ============================================================================

/// Emitted when a card has been added to the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub card_id: EntityId,
    pub name: String,
}

impl CardAdded {
    pub fn new(card_id: EntityId, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            card_id,
            name,
        }
    }
}

impl_domain_event!(CardAdded);

/// Emitted when a stored card has been replaced with edited data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub card_id: EntityId,
}

impl CardUpdated {
    pub fn new(card_id: EntityId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            card_id,
        }
    }
}

impl_domain_event!(CardUpdated);

/// Emitted after a card and its image files have been removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub card_id: EntityId,
    /// Image files that could not be removed and were left behind
    pub orphaned_images: Vec<String>,
}

impl CardDeleted {
    pub fn new(card_id: EntityId, orphaned_images: Vec<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            card_id,
            orphaned_images,
        }
    }
}

impl_domain_event!(CardDeleted);

/// Emitted when cards were pointed at edited set data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsReassigned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub set_code: String,
    pub card_count: usize,
}

impl CardsReassigned {
    pub fn new(set_code: String, card_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            set_code,
            card_count,
        }
    }
}

impl_domain_event!(CardsReassigned);

// ============================================================================
// SET EVENTS
// ============================================================================

/// Emitted when the set collection was (re)built from the external source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCollectionRebuilt {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub set_count: usize,
    pub latest_code: Option<String>,
}

impl SetCollectionRebuilt {
    pub fn new(set_count: usize, latest_code: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            set_count,
            latest_code,
        }
    }
}

impl_domain_event!(SetCollectionRebuilt);

/// Emitted when a single set has been edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Code the set was stored under before the edit
    pub previous_code: String,
    pub set: CardSet,
}

impl SetUpdated {
    pub fn new(previous_code: String, set: CardSet) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            previous_code,
            set,
        }
    }
}

impl_domain_event!(SetUpdated);
