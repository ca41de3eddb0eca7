// src/lib.rs
// CardCollection - Local-first trading card collection manager
//
// Architecture:
// - Domain-centric: entities and their invariants live in `domain`
// - Snapshot storage: each collection is one file, rewritten on every change
// - Event-driven: services coordinate through the event bus
// - Explicit: no global state, everything is wired in `AppState`

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;
pub mod storage;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_card,
    validate_set,
    AllocatedId,
    // Card
    Card,
    // Set
    CardSet,
    Condition,
    Entity,
    EntityId,
    ImageSlot,
    Language,
    UNASSIGNED_ID,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::AppConfig;

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    register_event_handlers,
    // Card events
    CardAdded,
    CardDeleted,
    CardUpdated,
    CardsReassigned,
    DomainEvent,
    EventBus,
    EventLogEntry,
    // Set events
    SetCollectionRebuilt,
    SetUpdated,
};

// ============================================================================
// PUBLIC API - Storage & Repositories
// ============================================================================

pub use storage::{CollectionCodec, LoadOutcome};

pub use repositories::{
    CardRepository,
    ContainerOrigin,
    EntityContainer,
    FileCardRepository,
    FileSetRepository,
    SetRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::ImageStore;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CardService, ExportService, RefreshOutcome, SetService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CardImageSource, MtgApiClient, SetSource, SourceSet};
