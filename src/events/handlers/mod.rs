// src/events/handlers/mod.rs
//
// Event Handlers - INTERNAL MODULE
//
// Handlers use closure-based subscription via EventBus::subscribe.

pub mod set_handler;

// Only export the registration function
pub use set_handler::register_event_handlers;
