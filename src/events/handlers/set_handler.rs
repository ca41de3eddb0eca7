// src/events/handlers/set_handler.rs
//
// Set Event Handler
//
// Keeps the set copies embedded in cards in line with edited sets.
//
// CRITICAL RULES:
// - Only consumes SetUpdated events
// - Delegates all logic to CardService
// - Errors are logged, never propagated into the bus

use std::sync::Arc;

use log::{debug, error};

use crate::events::{EventBus, SetUpdated};
use crate::services::CardService;

// ============================================================================
// HANDLER REGISTRATION
// ============================================================================

/// Registers the card-side reaction to set edits with the event bus.
pub fn register_event_handlers(bus: &EventBus, card_service: Arc<CardService>) {
    bus.subscribe::<SetUpdated, _>(move |event| {
        handle_set_updated(&card_service, event);
    });

    debug!("[SETS] Handlers registered");
}

// ============================================================================
// SET UPDATED HANDLER
// ============================================================================

fn handle_set_updated(service: &CardService, event: &SetUpdated) {
    match service.reassign_set(&event.previous_code, &event.set) {
        Ok(count) => {
            debug!(
                "[SETS] SetUpdated {} -> {}: {} cards reassigned",
                event.previous_code, event.set.code, count
            );
        }
        Err(e) => {
            error!(
                "[SETS] Failed to reassign cards of set {}: {}",
                event.previous_code, e
            );
        }
    }
}
