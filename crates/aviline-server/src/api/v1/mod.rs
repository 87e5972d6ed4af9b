//! V1 REST endpoints

pub mod actions;
pub mod areas;
pub mod cables;
pub mod content;
pub mod health;
pub mod nomenclature;
pub mod route;
