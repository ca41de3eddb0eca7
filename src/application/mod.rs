// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Wires repositories, infrastructure and services together
// - Provides the boundary between a front end and the services
// - Translates errors into front-end friendly responses

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
