//! Aviline Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions
//! - Persistence trait abstractions for unified storage
//! - Domain record types for persistence operations
//! - Two backends: external PostgreSQL/PostGIS and in-memory

pub mod entity;
pub mod memory;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export persistence traits
pub use traits::{
    ActionPersistence, AreaPersistence, ContentPersistence, InfrastructurePersistence,
    NomenclaturePersistence, PersistenceService,
};

// Re-export backends
pub use memory::MemoryPersistService;
pub use sql::SqlPersistService;

// Re-export record types
pub use model::{
    ActionDetail, ActionKind, ActionRecord, DiagnosisFields, EquipmentRecord, GeoAreaRecord,
    InfrastructureKind, InfrastructureRecord, MediaRecord, NewAction, NewEquipment,
    NewInfrastructure, NewMedia, NewNews, NewPartner, NewsRecord, NomenclatureRecord,
    OperationFields, PartnerRecord, SensitiveAreaRecord, StorageMode,
};
