//! Aviline Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all Aviline components:
//! - Error types and error codes
//! - The geometry model shared by the persistence and API layers

pub mod error;
pub mod geom;

// Re-exports for convenience
pub use error::{
    AvilineError, ErrorCode, PARAMETER_VALIDATE_ERROR, RESOURCE_NOT_FOUND, SERVER_ERROR, SUCCESS,
};
pub use geom::{Geometry, SRID};
