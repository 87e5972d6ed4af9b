//! Infrastructure persistence trait

use async_trait::async_trait;

use crate::model::{InfrastructureKind, InfrastructureRecord, NewInfrastructure};

/// Infrastructure storage operations
#[async_trait]
pub trait InfrastructurePersistence: Send + Sync {
    /// Insert a new infrastructure row with empty area sets and a fresh uuid
    async fn infrastructure_create(
        &self,
        new: &NewInfrastructure,
    ) -> anyhow::Result<InfrastructureRecord>;

    /// Get an infrastructure by its surrogate id
    async fn infrastructure_get(&self, id: i64) -> anyhow::Result<Option<InfrastructureRecord>>;

    /// Find all infrastructures, optionally restricted to one variant
    async fn infrastructure_find_all(
        &self,
        kind: Option<InfrastructureKind>,
    ) -> anyhow::Result<Vec<InfrastructureRecord>>;

    /// Delete an infrastructure (cascades to its actions)
    async fn infrastructure_delete(&self, id: i64) -> anyhow::Result<bool>;

    /// Replace the administrative/natural area set (full replace, not additive)
    async fn infrastructure_set_geo_areas(
        &self,
        id: i64,
        geo_area_ids: &[i64],
    ) -> anyhow::Result<()>;

    /// Replace the sensitivity zone set (full replace, not additive)
    async fn infrastructure_set_sensitive_areas(
        &self,
        id: i64,
        sensitive_area_ids: &[i64],
    ) -> anyhow::Result<()>;
}
