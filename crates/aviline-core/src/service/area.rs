//! Area service: read-only access to administrative areas and sensitivity
//! zones

use aviline_common::AvilineError;
use aviline_persistence::model::{GeoAreaRecord, SensitiveAreaRecord};
use aviline_persistence::traits::PersistenceService;

pub async fn get_geo_area(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<GeoAreaRecord, AvilineError> {
    persistence
        .geo_area_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("geo area", id))
}

pub async fn find_geo_areas(
    persistence: &dyn PersistenceService,
) -> Result<Vec<GeoAreaRecord>, AvilineError> {
    Ok(persistence.geo_area_find_all().await?)
}

pub async fn get_sensitive_area(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<SensitiveAreaRecord, AvilineError> {
    persistence
        .sensitive_area_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("sensitive area", id))
}

pub async fn find_sensitive_areas(
    persistence: &dyn PersistenceService,
) -> Result<Vec<SensitiveAreaRecord>, AvilineError> {
    Ok(persistence.sensitive_area_find_all().await?)
}
