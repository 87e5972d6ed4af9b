//! Nomenclature persistence trait

use async_trait::async_trait;

use crate::model::NomenclatureRecord;

/// Classification term storage operations (read-only reference data)
#[async_trait]
pub trait NomenclaturePersistence: Send + Sync {
    async fn nomenclature_get(&self, id: i64) -> anyhow::Result<Option<NomenclatureRecord>>;

    /// Find all terms, optionally restricted to one type mnemonic
    async fn nomenclature_find_all(
        &self,
        mnemonic: Option<&str>,
    ) -> anyhow::Result<Vec<NomenclatureRecord>>;
}
