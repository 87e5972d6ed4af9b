//! Core domain services for Aviline
//!
//! Business rules on top of the persistence traits: infrastructure creation
//! with area auto-attachment, action creation with current-record
//! maintenance, and the content access rules.

pub mod service;
