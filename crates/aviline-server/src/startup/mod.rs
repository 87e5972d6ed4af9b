//! Server startup plumbing: logging and HTTP server setup

pub mod http;
pub mod logging;

pub use http::api_server;
pub use logging::{LoggingConfig, LoggingGuard, init_logging};
