//! SeaORM entity definitions
//!
//! One table per entity; polymorphic models from the source domain
//! (infrastructure point/line, action diagnosis/operation) are flattened into
//! single tables with a `kind` discriminant column.

pub mod action;
pub mod action_media;
pub mod action_pole_type;
pub mod equipment;
pub mod geo_area;
pub mod infrastructure;
pub mod infrastructure_geo_area;
pub mod infrastructure_sensitive_area;
pub mod media;
pub mod news;
pub mod nomenclature;
pub mod partner;
pub mod prelude;
pub mod sensitive_area;
