// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod card_service;
pub mod export_service;
pub mod set_service;

#[cfg(test)]
mod set_service_tests;

// Re-export all services and their types
pub use card_service::CardService;

pub use set_service::{
    RefreshOutcome,
    SetService,
};

pub use export_service::ExportService;
