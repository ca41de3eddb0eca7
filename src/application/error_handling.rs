// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for the command line
// - Never exposes internal implementation details
// - Logs errors for debugging

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    /// The application cannot continue safely
    pub fatal: bool,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// Key already taken (409)
    Conflict,

    /// Stored collection unreadable (500)
    Storage,

    /// External service error (502)
    ExternalService,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
            fatal: false,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(err: AppError) -> Self {
        let fatal = err.is_fatal();
        let mut response = match err {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::DuplicateKey(key) => {
                Self::new(ErrorType::Conflict, "Entry already exists", Some(key))
            }

            AppError::CorruptCollection { path, reason } => {
                debug!("Corrupt collection {:?}: {}", path, reason);
                Self::new(
                    ErrorType::Storage,
                    "Stored collection could not be read",
                    Some(format!("{}: {}", path.display(), reason)),
                )
            }

            AppError::Serialization(serde_error) => {
                debug!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                debug!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::External(message) => {
                Self::new(ErrorType::ExternalService, "External service error", Some(message))
            }

            AppError::Config(message) => {
                Self::new(ErrorType::Validation, "Invalid configuration", Some(message))
            }

            AppError::Other(message) => {
                debug!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        };
        response.fatal = fatal;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
        assert!(!error.fatal);
    }

    #[test]
    fn test_corrupt_collection_is_fatal() {
        let error = ErrorResponse::from_app_error(AppError::CorruptCollection {
            path: PathBuf::from("/data/carddata"),
            reason: "EOF while parsing".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Storage);
        assert!(error.fatal);
        assert!(error.details.unwrap().contains("carddata"));
    }

    #[test]
    fn test_external_error_keeps_message() {
        let error = ErrorResponse::from_app_error(AppError::External("timeout".to_string()));
        assert_eq!(error.error_type, ErrorType::ExternalService);
        assert_eq!(error.details.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(AppError::DuplicateKey("set LEA".to_string()));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"error_type\":\"conflict\""));
        assert!(json.contains("set LEA"));
        assert!(json.contains("\"fatal\":false"));
    }
}
