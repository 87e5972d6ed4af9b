//! Error types and error codes for Aviline
//!
//! This module defines:
//! - `AvilineError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses
//!
//! The two multi-step create protocols (current-record maintenance and area
//! auto-attachment) always surface their failures as `Configuration` after the
//! compensating rollback has run, so callers can react on the error kind
//! instead of matching message strings.

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum AvilineError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("database error: {0}")]
    Database(String),
}

impl AvilineError {
    /// Error kind for a referenced entity that does not exist.
    pub fn not_found(entity: &str, id: i64) -> Self {
        AvilineError::NotFound(format!("{} '{}' not exist", entity, id))
    }
}

impl From<anyhow::Error> for AvilineError {
    fn from(err: anyhow::Error) -> Self {
        AvilineError::Database(err.to_string())
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aviline_error_display() {
        let err = AvilineError::IllegalArgument("point geometry is required".to_string());
        assert_eq!(format!("{}", err), "caused: point geometry is required");

        let err = AvilineError::not_found("infrastructure", 42);
        assert_eq!(format!("{}", err), "infrastructure '42' not exist");

        let err = AvilineError::Configuration("no diagnosis created".to_string());
        assert_eq!(format!("{}", err), "configuration error: no diagnosis created");
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(SUCCESS.code, 0);
        assert_eq!(SUCCESS.message, "success");
        assert_eq!(RESOURCE_NOT_FOUND.code, 20004);
        assert_eq!(SERVER_ERROR.code, 30000);
    }
}
