//! Content persistence trait: news, partners and media metadata

use async_trait::async_trait;

use crate::model::{MediaRecord, NewMedia, NewNews, NewPartner, NewsRecord, PartnerRecord};

/// News/partners/media storage operations
#[async_trait]
pub trait ContentPersistence: Send + Sync {
    /// Find all news items; private items only when `include_private` is set
    async fn news_find_all(&self, include_private: bool) -> anyhow::Result<Vec<NewsRecord>>;

    async fn news_get(&self, id: i64) -> anyhow::Result<Option<NewsRecord>>;

    async fn news_create(&self, new: &NewNews) -> anyhow::Result<NewsRecord>;

    async fn news_update(&self, id: i64, new: &NewNews) -> anyhow::Result<bool>;

    async fn news_delete(&self, id: i64) -> anyhow::Result<bool>;

    async fn partner_find_all(&self) -> anyhow::Result<Vec<PartnerRecord>>;

    async fn partner_get(&self, id: i64) -> anyhow::Result<Option<PartnerRecord>>;

    async fn partner_create(&self, new: &NewPartner) -> anyhow::Result<PartnerRecord>;

    async fn partner_update(&self, id: i64, new: &NewPartner) -> anyhow::Result<bool>;

    async fn partner_delete(&self, id: i64) -> anyhow::Result<bool>;

    async fn media_find_all(&self) -> anyhow::Result<Vec<MediaRecord>>;

    async fn media_get(&self, id: i64) -> anyhow::Result<Option<MediaRecord>>;

    async fn media_create(&self, new: &NewMedia) -> anyhow::Result<MediaRecord>;
}
