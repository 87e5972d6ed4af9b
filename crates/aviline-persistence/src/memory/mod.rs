//! In-memory persistence backend
//!
//! Map-backed implementation of the persistence traits for standalone runs
//! and tests. The spatial intersects queries are evaluated in process with
//! the `geo` crate instead of PostGIS.
//!
//! Every operation is counted by name, and any operation can be armed to
//! fail exactly once, which is how the compensating-rollback paths of the
//! service layer get exercised.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use aviline_common::Geometry;

use crate::model::*;
use crate::traits::*;

#[derive(Default)]
struct Store {
    seq: i64,
    nomenclatures: BTreeMap<i64, NomenclatureRecord>,
    geo_areas: BTreeMap<i64, GeoAreaRecord>,
    sensitive_areas: BTreeMap<i64, SensitiveAreaRecord>,
    infrastructures: BTreeMap<i64, InfrastructureRecord>,
    actions: BTreeMap<i64, ActionRecord>,
    media: BTreeMap<i64, MediaRecord>,
    news: BTreeMap<i64, NewsRecord>,
    partners: BTreeMap<i64, PartnerRecord>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.seq += 1;
        self.seq
    }
}

/// In-memory persistence service
#[derive(Default)]
pub struct MemoryPersistService {
    store: RwLock<Store>,
    calls: Mutex<HashMap<&'static str, u64>>,
    failpoints: Mutex<HashSet<&'static str>>,
}

impl MemoryPersistService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the call and fail it if the named failpoint is armed
    fn hit(&self, op: &'static str) -> anyhow::Result<()> {
        *self.calls.lock().entry(op).or_insert(0) += 1;
        if self.failpoints.lock().remove(op) {
            anyhow::bail!("injected failure: {op}");
        }
        Ok(())
    }

    /// Number of times the named operation has been called
    pub fn call_count(&self, op: &str) -> u64 {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    /// Arm the named operation to fail on its next call
    pub fn fail_once(&self, op: &'static str) {
        self.failpoints.lock().insert(op);
    }

    pub fn seed_nomenclature(&self, code: &str, mnemonic: &str, label: &str) -> i64 {
        let mut store = self.store.write();
        let id = store.next_id();
        store.nomenclatures.insert(
            id,
            NomenclatureRecord {
                id,
                code: code.to_string(),
                mnemonic: mnemonic.to_string(),
                label: label.to_string(),
            },
        );
        id
    }

    pub fn seed_geo_area(&self, name: &str, geom: Geometry) -> i64 {
        let mut store = self.store.write();
        let id = store.next_id();
        store.geo_areas.insert(
            id,
            GeoAreaRecord {
                id,
                uuid: Uuid::new_v4(),
                name: name.to_string(),
                code: None,
                area_type: None,
                geom,
            },
        );
        id
    }

    pub fn seed_sensitive_area(&self, name: &str, geom: Geometry) -> i64 {
        let mut store = self.store.write();
        let id = store.next_id();
        store.sensitive_areas.insert(
            id,
            SensitiveAreaRecord {
                id,
                uuid: Uuid::new_v4(),
                name: name.to_string(),
                geom,
            },
        );
        id
    }
}

#[async_trait]
impl PersistenceService for MemoryPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Memory
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl InfrastructurePersistence for MemoryPersistService {
    async fn infrastructure_create(
        &self,
        new: &NewInfrastructure,
    ) -> anyhow::Result<InfrastructureRecord> {
        self.hit("infrastructure_create")?;
        let mut store = self.store.write();
        let id = store.next_id();
        let record = InfrastructureRecord {
            id,
            uuid: Uuid::new_v4(),
            kind: new.kind,
            owner_id: new.owner_id,
            geom: new.geom.clone(),
            geo_area_ids: Vec::new(),
            sensitive_area_ids: Vec::new(),
        };
        store.infrastructures.insert(id, record.clone());
        Ok(record)
    }

    async fn infrastructure_get(&self, id: i64) -> anyhow::Result<Option<InfrastructureRecord>> {
        self.hit("infrastructure_get")?;
        Ok(self.store.read().infrastructures.get(&id).cloned())
    }

    async fn infrastructure_find_all(
        &self,
        kind: Option<InfrastructureKind>,
    ) -> anyhow::Result<Vec<InfrastructureRecord>> {
        self.hit("infrastructure_find_all")?;
        Ok(self
            .store
            .read()
            .infrastructures
            .values()
            .filter(|r| kind.is_none_or(|k| r.kind == k))
            .cloned()
            .collect())
    }

    async fn infrastructure_delete(&self, id: i64) -> anyhow::Result<bool> {
        self.hit("infrastructure_delete")?;
        let mut store = self.store.write();
        let removed = store.infrastructures.remove(&id).is_some();
        if removed {
            // Cascade, same as the foreign keys in the external database
            store.actions.retain(|_, a| a.infrastructure_id != id);
        }
        Ok(removed)
    }

    async fn infrastructure_set_geo_areas(
        &self,
        id: i64,
        geo_area_ids: &[i64],
    ) -> anyhow::Result<()> {
        self.hit("infrastructure_set_geo_areas")?;
        let mut store = self.store.write();
        match store.infrastructures.get_mut(&id) {
            Some(record) => {
                record.geo_area_ids = geo_area_ids.to_vec();
                Ok(())
            }
            None => anyhow::bail!("infrastructure '{id}' not exist"),
        }
    }

    async fn infrastructure_set_sensitive_areas(
        &self,
        id: i64,
        sensitive_area_ids: &[i64],
    ) -> anyhow::Result<()> {
        self.hit("infrastructure_set_sensitive_areas")?;
        let mut store = self.store.write();
        match store.infrastructures.get_mut(&id) {
            Some(record) => {
                record.sensitive_area_ids = sensitive_area_ids.to_vec();
                Ok(())
            }
            None => anyhow::bail!("infrastructure '{id}' not exist"),
        }
    }
}

#[async_trait]
impl ActionPersistence for MemoryPersistService {
    async fn action_create(&self, new: &NewAction, last: bool) -> anyhow::Result<ActionRecord> {
        self.hit("action_create")?;
        let mut store = self.store.write();
        let id = store.next_id();
        // Associations are attached in separate steps, start with them empty
        let detail = match &new.detail {
            ActionDetail::Diagnosis(d) => ActionDetail::Diagnosis(DiagnosisFields {
                pole_type_ids: Vec::new(),
                ..d.clone()
            }),
            ActionDetail::Operation(o) => ActionDetail::Operation(OperationFields {
                equipments: Vec::new(),
                ..o.clone()
            }),
        };
        let record = ActionRecord {
            id,
            uuid: Uuid::new_v4(),
            infrastructure_id: new.infrastructure_id,
            date: new.date,
            remark: new.remark.clone(),
            last,
            media_ids: Vec::new(),
            detail,
        };
        store.actions.insert(id, record.clone());
        Ok(record)
    }

    async fn action_get(&self, id: i64) -> anyhow::Result<Option<ActionRecord>> {
        self.hit("action_get")?;
        Ok(self.store.read().actions.get(&id).cloned())
    }

    async fn action_find_all(
        &self,
        kind: Option<ActionKind>,
        infrastructure_id: Option<i64>,
    ) -> anyhow::Result<Vec<ActionRecord>> {
        self.hit("action_find_all")?;
        Ok(self
            .store
            .read()
            .actions
            .values()
            .filter(|a| kind.is_none_or(|k| a.kind() == k))
            .filter(|a| infrastructure_id.is_none_or(|i| a.infrastructure_id == i))
            .cloned()
            .collect())
    }

    async fn action_find_current(
        &self,
        kind: ActionKind,
        infrastructure_id: i64,
    ) -> anyhow::Result<Vec<ActionRecord>> {
        self.hit("action_find_current")?;
        Ok(self
            .store
            .read()
            .actions
            .values()
            .filter(|a| a.kind() == kind && a.infrastructure_id == infrastructure_id && a.last)
            .cloned()
            .collect())
    }

    async fn action_set_last(&self, id: i64, last: bool) -> anyhow::Result<()> {
        self.hit("action_set_last")?;
        let mut store = self.store.write();
        match store.actions.get_mut(&id) {
            Some(record) => {
                record.last = last;
                Ok(())
            }
            None => anyhow::bail!("action '{id}' not exist"),
        }
    }

    async fn action_set_pole_types(
        &self,
        id: i64,
        nomenclature_ids: &[i64],
    ) -> anyhow::Result<()> {
        self.hit("action_set_pole_types")?;
        let mut store = self.store.write();
        match store.actions.get_mut(&id) {
            Some(ActionRecord {
                detail: ActionDetail::Diagnosis(d),
                ..
            }) => {
                d.pole_type_ids = nomenclature_ids.to_vec();
                Ok(())
            }
            Some(_) => anyhow::bail!("action '{id}' is not a diagnosis"),
            None => anyhow::bail!("action '{id}' not exist"),
        }
    }

    async fn action_set_media(&self, id: i64, media_ids: &[i64]) -> anyhow::Result<()> {
        self.hit("action_set_media")?;
        let mut store = self.store.write();
        match store.actions.get_mut(&id) {
            Some(record) => {
                record.media_ids = media_ids.to_vec();
                Ok(())
            }
            None => anyhow::bail!("action '{id}' not exist"),
        }
    }

    async fn action_replace_equipments(
        &self,
        id: i64,
        equipments: &[NewEquipment],
    ) -> anyhow::Result<()> {
        self.hit("action_replace_equipments")?;
        let mut store = self.store.write();
        let rows: Vec<EquipmentRecord> = equipments
            .iter()
            .map(|e| {
                let eid = store.next_id();
                EquipmentRecord {
                    id: eid,
                    type_id: e.type_id,
                    count: e.count,
                    reference: e.reference.clone(),
                    comment: e.comment.clone(),
                }
            })
            .collect();
        match store.actions.get_mut(&id) {
            Some(ActionRecord {
                detail: ActionDetail::Operation(o),
                ..
            }) => {
                o.equipments = rows;
                Ok(())
            }
            Some(_) => anyhow::bail!("action '{id}' is not an operation"),
            None => anyhow::bail!("action '{id}' not exist"),
        }
    }

    async fn action_delete(&self, id: i64) -> anyhow::Result<bool> {
        self.hit("action_delete")?;
        Ok(self.store.write().actions.remove(&id).is_some())
    }
}

#[async_trait]
impl AreaPersistence for MemoryPersistService {
    async fn geo_area_get(&self, id: i64) -> anyhow::Result<Option<GeoAreaRecord>> {
        self.hit("geo_area_get")?;
        Ok(self.store.read().geo_areas.get(&id).cloned())
    }

    async fn geo_area_find_all(&self) -> anyhow::Result<Vec<GeoAreaRecord>> {
        self.hit("geo_area_find_all")?;
        Ok(self.store.read().geo_areas.values().cloned().collect())
    }

    async fn geo_areas_intersecting(&self, geom: &Geometry) -> anyhow::Result<Vec<i64>> {
        self.hit("geo_areas_intersecting")?;
        Ok(self
            .store
            .read()
            .geo_areas
            .values()
            .filter(|a| a.geom.intersects(geom))
            .map(|a| a.id)
            .collect())
    }

    async fn sensitive_area_get(&self, id: i64) -> anyhow::Result<Option<SensitiveAreaRecord>> {
        self.hit("sensitive_area_get")?;
        Ok(self.store.read().sensitive_areas.get(&id).cloned())
    }

    async fn sensitive_area_find_all(&self) -> anyhow::Result<Vec<SensitiveAreaRecord>> {
        self.hit("sensitive_area_find_all")?;
        Ok(self.store.read().sensitive_areas.values().cloned().collect())
    }

    async fn sensitive_areas_intersecting(&self, geom: &Geometry) -> anyhow::Result<Vec<i64>> {
        self.hit("sensitive_areas_intersecting")?;
        Ok(self
            .store
            .read()
            .sensitive_areas
            .values()
            .filter(|a| a.geom.intersects(geom))
            .map(|a| a.id)
            .collect())
    }
}

#[async_trait]
impl ContentPersistence for MemoryPersistService {
    async fn news_find_all(&self, include_private: bool) -> anyhow::Result<Vec<NewsRecord>> {
        self.hit("news_find_all")?;
        Ok(self
            .store
            .read()
            .news
            .values()
            .filter(|n| include_private || !n.private)
            .cloned()
            .collect())
    }

    async fn news_get(&self, id: i64) -> anyhow::Result<Option<NewsRecord>> {
        self.hit("news_get")?;
        Ok(self.store.read().news.get(&id).cloned())
    }

    async fn news_create(&self, new: &NewNews) -> anyhow::Result<NewsRecord> {
        self.hit("news_create")?;
        let mut store = self.store.write();
        let id = store.next_id();
        let record = NewsRecord {
            id,
            title: new.title.clone(),
            teaser: new.teaser.clone(),
            body: new.body.clone(),
            date: new.date,
            private: new.private,
        };
        store.news.insert(id, record.clone());
        Ok(record)
    }

    async fn news_update(&self, id: i64, new: &NewNews) -> anyhow::Result<bool> {
        self.hit("news_update")?;
        let mut store = self.store.write();
        match store.news.get_mut(&id) {
            Some(record) => {
                record.title = new.title.clone();
                record.teaser = new.teaser.clone();
                record.body = new.body.clone();
                record.date = new.date;
                record.private = new.private;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn news_delete(&self, id: i64) -> anyhow::Result<bool> {
        self.hit("news_delete")?;
        Ok(self.store.write().news.remove(&id).is_some())
    }

    async fn partner_find_all(&self) -> anyhow::Result<Vec<PartnerRecord>> {
        self.hit("partner_find_all")?;
        Ok(self.store.read().partners.values().cloned().collect())
    }

    async fn partner_get(&self, id: i64) -> anyhow::Result<Option<PartnerRecord>> {
        self.hit("partner_get")?;
        Ok(self.store.read().partners.get(&id).cloned())
    }

    async fn partner_create(&self, new: &NewPartner) -> anyhow::Result<PartnerRecord> {
        self.hit("partner_create")?;
        let mut store = self.store.write();
        let id = store.next_id();
        let record = PartnerRecord {
            id,
            name: new.name.clone(),
            url: new.url.clone(),
            logo: new.logo.clone(),
        };
        store.partners.insert(id, record.clone());
        Ok(record)
    }

    async fn partner_update(&self, id: i64, new: &NewPartner) -> anyhow::Result<bool> {
        self.hit("partner_update")?;
        let mut store = self.store.write();
        match store.partners.get_mut(&id) {
            Some(record) => {
                record.name = new.name.clone();
                record.url = new.url.clone();
                record.logo = new.logo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn partner_delete(&self, id: i64) -> anyhow::Result<bool> {
        self.hit("partner_delete")?;
        Ok(self.store.write().partners.remove(&id).is_some())
    }

    async fn media_find_all(&self) -> anyhow::Result<Vec<MediaRecord>> {
        self.hit("media_find_all")?;
        Ok(self.store.read().media.values().cloned().collect())
    }

    async fn media_get(&self, id: i64) -> anyhow::Result<Option<MediaRecord>> {
        self.hit("media_get")?;
        Ok(self.store.read().media.get(&id).cloned())
    }

    async fn media_create(&self, new: &NewMedia) -> anyhow::Result<MediaRecord> {
        self.hit("media_create")?;
        let mut store = self.store.write();
        let id = store.next_id();
        let record = MediaRecord {
            id,
            uuid: Uuid::new_v4(),
            path: new.path.clone(),
            date: new.date,
            author: new.author.clone(),
            source: new.source.clone(),
            remark: new.remark.clone(),
        };
        store.media.insert(id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl NomenclaturePersistence for MemoryPersistService {
    async fn nomenclature_get(&self, id: i64) -> anyhow::Result<Option<NomenclatureRecord>> {
        self.hit("nomenclature_get")?;
        Ok(self.store.read().nomenclatures.get(&id).cloned())
    }

    async fn nomenclature_find_all(
        &self,
        mnemonic: Option<&str>,
    ) -> anyhow::Result<Vec<NomenclatureRecord>> {
        self.hit("nomenclature_find_all")?;
        Ok(self
            .store
            .read()
            .nomenclatures
            .values()
            .filter(|n| mnemonic.is_none_or(|m| n.mnemonic == m))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviline_common::Geometry;

    fn square() -> Geometry {
        Geometry::polygon(vec![
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 4.0],
            [0.0, 4.0],
            [0.0, 0.0],
        ])
    }

    #[tokio::test]
    async fn test_intersecting_areas() {
        let service = MemoryPersistService::new();
        let inside = service.seed_geo_area("inside", square());
        let _far = service.seed_geo_area(
            "far",
            Geometry::polygon(vec![
                [10.0, 10.0],
                [12.0, 10.0],
                [12.0, 12.0],
                [10.0, 12.0],
                [10.0, 10.0],
            ]),
        );

        let ids = service
            .geo_areas_intersecting(&Geometry::point(2.0, 2.0))
            .await
            .unwrap();
        assert_eq!(ids, vec![inside]);
    }

    #[tokio::test]
    async fn test_infrastructure_delete_cascades_to_actions() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        let infra = service
            .infrastructure_create(&NewInfrastructure {
                kind: InfrastructureKind::Point,
                owner_id: owner,
                geom: Some(Geometry::point(1.0, 1.0)),
            })
            .await
            .unwrap();
        service
            .action_create(
                &NewAction {
                    infrastructure_id: infra.id,
                    date: chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                    remark: None,
                    media_ids: vec![],
                    detail: ActionDetail::Diagnosis(DiagnosisFields::default()),
                },
                true,
            )
            .await
            .unwrap();

        assert!(service.infrastructure_delete(infra.id).await.unwrap());
        let actions = service.action_find_all(None, None).await.unwrap();
        assert!(actions.is_empty());
    }

    #[tokio::test]
    async fn test_failpoint_fires_once() {
        let service = MemoryPersistService::new();
        service.fail_once("news_find_all");
        assert!(service.news_find_all(true).await.is_err());
        assert!(service.news_find_all(true).await.is_ok());
        assert_eq!(service.call_count("news_find_all"), 2);
    }

    #[tokio::test]
    async fn test_news_private_filter() {
        let service = MemoryPersistService::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        service
            .news_create(&NewNews {
                title: "public".to_string(),
                teaser: None,
                body: "body".to_string(),
                date,
                private: false,
            })
            .await
            .unwrap();
        service
            .news_create(&NewNews {
                title: "members only".to_string(),
                teaser: None,
                body: "body".to_string(),
                date,
                private: true,
            })
            .await
            .unwrap();

        assert_eq!(service.news_find_all(false).await.unwrap().len(), 1);
        assert_eq!(service.news_find_all(true).await.unwrap().len(), 2);
    }
}
