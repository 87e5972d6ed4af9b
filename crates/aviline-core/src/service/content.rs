//! Content service: news, partners and media metadata
//!
//! News items can be flagged private. Private items are only returned when
//! the caller is authenticated, which the web layer signals through
//! `include_private`.

use aviline_common::AvilineError;
use aviline_persistence::model::{
    MediaRecord, NewMedia, NewNews, NewPartner, NewsRecord, PartnerRecord,
};
use aviline_persistence::traits::PersistenceService;

pub async fn find_news(
    persistence: &dyn PersistenceService,
    include_private: bool,
) -> Result<Vec<NewsRecord>, AvilineError> {
    Ok(persistence.news_find_all(include_private).await?)
}

/// Get one news item. Private items are hidden from unauthenticated callers,
/// indistinguishable from items that do not exist.
pub async fn get_news(
    persistence: &dyn PersistenceService,
    id: i64,
    include_private: bool,
) -> Result<NewsRecord, AvilineError> {
    match persistence.news_get(id).await? {
        Some(record) if include_private || !record.private => Ok(record),
        _ => Err(AvilineError::not_found("news", id)),
    }
}

pub async fn create_news(
    persistence: &dyn PersistenceService,
    new: &NewNews,
) -> Result<NewsRecord, AvilineError> {
    Ok(persistence.news_create(new).await?)
}

pub async fn update_news(
    persistence: &dyn PersistenceService,
    id: i64,
    new: &NewNews,
) -> Result<(), AvilineError> {
    if !persistence.news_update(id, new).await? {
        return Err(AvilineError::not_found("news", id));
    }
    Ok(())
}

pub async fn delete_news(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<(), AvilineError> {
    if !persistence.news_delete(id).await? {
        return Err(AvilineError::not_found("news", id));
    }
    Ok(())
}

pub async fn find_partners(
    persistence: &dyn PersistenceService,
) -> Result<Vec<PartnerRecord>, AvilineError> {
    Ok(persistence.partner_find_all().await?)
}

pub async fn get_partner(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<PartnerRecord, AvilineError> {
    persistence
        .partner_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("partner", id))
}

pub async fn create_partner(
    persistence: &dyn PersistenceService,
    new: &NewPartner,
) -> Result<PartnerRecord, AvilineError> {
    Ok(persistence.partner_create(new).await?)
}

pub async fn update_partner(
    persistence: &dyn PersistenceService,
    id: i64,
    new: &NewPartner,
) -> Result<(), AvilineError> {
    if !persistence.partner_update(id, new).await? {
        return Err(AvilineError::not_found("partner", id));
    }
    Ok(())
}

pub async fn delete_partner(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<(), AvilineError> {
    if !persistence.partner_delete(id).await? {
        return Err(AvilineError::not_found("partner", id));
    }
    Ok(())
}

pub async fn find_media(
    persistence: &dyn PersistenceService,
) -> Result<Vec<MediaRecord>, AvilineError> {
    Ok(persistence.media_find_all().await?)
}

pub async fn get_media(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<MediaRecord, AvilineError> {
    persistence
        .media_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("media", id))
}

pub async fn create_media(
    persistence: &dyn PersistenceService,
    new: &NewMedia,
) -> Result<MediaRecord, AvilineError> {
    Ok(persistence.media_create(new).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviline_persistence::memory::MemoryPersistService;
    use chrono::NaiveDate;

    fn news(title: &str, private: bool) -> NewNews {
        NewNews {
            title: title.to_string(),
            teaser: None,
            body: "body".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            private,
        }
    }

    #[tokio::test]
    async fn test_private_news_hidden_from_anonymous() {
        let service = MemoryPersistService::new();
        create_news(&service, &news("public", false)).await.unwrap();
        let hidden = create_news(&service, &news("members", true)).await.unwrap();

        let anonymous = find_news(&service, false).await.unwrap();
        assert_eq!(anonymous.len(), 1);
        assert_eq!(anonymous[0].title, "public");

        let authenticated = find_news(&service, true).await.unwrap();
        assert_eq!(authenticated.len(), 2);

        // Hidden items look like missing items
        let err = get_news(&service, hidden.id, false).await.unwrap_err();
        assert!(matches!(err, AvilineError::NotFound(_)));
        assert!(get_news(&service, hidden.id, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_partner() {
        let service = MemoryPersistService::new();
        let err = update_partner(
            &service,
            7,
            &NewPartner {
                name: "LPO".to_string(),
                url: None,
                logo: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AvilineError::NotFound(_)));
    }
}
