//! Domain service functions
//!
//! Free async functions over `&dyn PersistenceService`, so the same rules run
//! against both the external database and the in-memory backend.

pub mod action;
pub mod area;
pub mod content;
pub mod infrastructure;
pub mod nomenclature;
