//! Persistence traits for the unified storage abstraction layer
//!
//! These traits abstract over the two storage backends: the external
//! PostgreSQL/PostGIS database and the in-memory store used for tests and
//! standalone runs.

pub mod action;
pub mod area;
pub mod content;
pub mod infrastructure;
pub mod nomenclature;

pub use action::ActionPersistence;
pub use area::AreaPersistence;
pub use content::ContentPersistence;
pub use infrastructure::InfrastructurePersistence;
pub use nomenclature::NomenclaturePersistence;

use async_trait::async_trait;

use crate::model::StorageMode;

/// Unified persistence service trait
///
/// Main interface for all storage operations. Implementations dispatch to the
/// appropriate storage backend.
#[async_trait]
pub trait PersistenceService:
    InfrastructurePersistence
    + ActionPersistence
    + AreaPersistence
    + ContentPersistence
    + NomenclaturePersistence
    + Send
    + Sync
{
    /// Get the current storage mode
    fn storage_mode(&self) -> StorageMode;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
