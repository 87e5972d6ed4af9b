//! REST API surface

pub mod model;
pub mod v1;
