//! Area persistence trait
//!
//! Areas are read-only reference data; the intersects queries are the heart
//! of the area auto-attacher. The predicate is the standard two-dimensional
//! intersects (boundary touching included), with no buffering or tolerance,
//! over SRID 4326 geometries.

use async_trait::async_trait;

use aviline_common::Geometry;

use crate::model::{GeoAreaRecord, SensitiveAreaRecord};

/// Administrative/natural area and sensitivity zone storage operations
#[async_trait]
pub trait AreaPersistence: Send + Sync {
    async fn geo_area_get(&self, id: i64) -> anyhow::Result<Option<GeoAreaRecord>>;

    async fn geo_area_find_all(&self) -> anyhow::Result<Vec<GeoAreaRecord>>;

    /// Ids of administrative/natural areas whose geometry intersects `geom`
    async fn geo_areas_intersecting(&self, geom: &Geometry) -> anyhow::Result<Vec<i64>>;

    async fn sensitive_area_get(&self, id: i64) -> anyhow::Result<Option<SensitiveAreaRecord>>;

    async fn sensitive_area_find_all(&self) -> anyhow::Result<Vec<SensitiveAreaRecord>>;

    /// Ids of sensitivity zones whose geometry intersects `geom`
    async fn sensitive_areas_intersecting(&self, geom: &Geometry) -> anyhow::Result<Vec<i64>>;
}
