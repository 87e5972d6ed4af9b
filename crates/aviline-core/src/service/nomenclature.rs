//! Nomenclature service: read-only access to classification terms

use aviline_common::AvilineError;
use aviline_persistence::model::NomenclatureRecord;
use aviline_persistence::traits::PersistenceService;

pub async fn get_nomenclature(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<NomenclatureRecord, AvilineError> {
    persistence
        .nomenclature_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("nomenclature", id))
}

/// Find classification terms, optionally restricted to one type mnemonic
pub async fn find_nomenclatures(
    persistence: &dyn PersistenceService,
    mnemonic: Option<&str>,
) -> Result<Vec<NomenclatureRecord>, AvilineError> {
    Ok(persistence.nomenclature_find_all(mnemonic).await?)
}
