//! HTTP API server for Aviline
//!
//! Exposes the domain services over a versioned REST API, wires the storage
//! backend from configuration and hosts the startup plumbing (logging, HTTP
//! server, shutdown).

pub mod api;
pub mod model;
pub mod startup;
