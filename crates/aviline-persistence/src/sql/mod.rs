//! SQL-based persistence backend (PostgreSQL/PostGIS via SeaORM)
//!
//! Geometry columns hold GeoJSON text; the spatial intersects predicate is
//! delegated to PostGIS through raw SQL statements, with no buffering or
//! tolerance applied.

use async_trait::async_trait;
use sea_orm::{prelude::Expr, *};
use uuid::Uuid;

use aviline_common::{Geometry, SRID};

use crate::entity::{
    action, action_media, action_pole_type, equipment, geo_area, infrastructure,
    infrastructure_geo_area, infrastructure_sensitive_area, media, news, nomenclature, partner,
    sensitive_area,
};
use crate::model::*;
use crate::traits::*;

/// External database persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and implements all persistence traits
/// with direct database queries.
pub struct SqlPersistService {
    db: DatabaseConnection,
}

impl SqlPersistService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Resolve the area id sets of one infrastructure row into a record
    async fn load_infrastructure(
        &self,
        model: infrastructure::Model,
    ) -> anyhow::Result<InfrastructureRecord> {
        let geo_area_ids: Vec<i64> = infrastructure_geo_area::Entity::find()
            .filter(infrastructure_geo_area::Column::InfrastructureId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.geo_area_id)
            .collect();
        let sensitive_area_ids: Vec<i64> = infrastructure_sensitive_area::Entity::find()
            .filter(infrastructure_sensitive_area::Column::InfrastructureId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.sensitive_area_id)
            .collect();

        infrastructure_record(model, geo_area_ids, sensitive_area_ids)
    }

    /// Resolve the association sets of one action row into a record
    async fn load_action(&self, model: action::Model) -> anyhow::Result<ActionRecord> {
        let pole_type_ids: Vec<i64> = action_pole_type::Entity::find()
            .filter(action_pole_type::Column::ActionId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.nomenclature_id)
            .collect();
        let media_ids: Vec<i64> = action_media::Entity::find()
            .filter(action_media::Column::ActionId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.media_id)
            .collect();
        let equipments: Vec<EquipmentRecord> = equipment::Entity::find()
            .filter(equipment::Column::ActionId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(equipment_record)
            .collect();

        action_record(model, pole_type_ids, media_ids, equipments)
    }

    /// Run one PostGIS intersects query against an area table
    async fn areas_intersecting(&self, table: &str, geom: &Geometry) -> anyhow::Result<Vec<i64>> {
        let sql = format!(
            r#"SELECT "id" FROM "{}" WHERE ST_Intersects(ST_SetSRID(ST_GeomFromGeoJSON("geom"), {srid}), ST_SetSRID(ST_GeomFromGeoJSON($1), {srid}))"#,
            table,
            srid = SRID,
        );
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [geom.to_json()?.into()]);
        let rows = self.db.query_all(stmt).await?;
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(row.try_get::<i64>("", "id")?);
        }
        Ok(ids)
    }
}

/// Convert an infrastructure row plus its resolved area id sets into a record
fn infrastructure_record(
    model: infrastructure::Model,
    geo_area_ids: Vec<i64>,
    sensitive_area_ids: Vec<i64>,
) -> anyhow::Result<InfrastructureRecord> {
    let kind: InfrastructureKind = model
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let geom = model.geom.as_deref().map(Geometry::from_json).transpose()?;
    Ok(InfrastructureRecord {
        id: model.id,
        uuid: model.uuid,
        kind,
        owner_id: model.owner_id,
        geom,
        geo_area_ids,
        sensitive_area_ids,
    })
}

fn equipment_record(model: equipment::Model) -> EquipmentRecord {
    EquipmentRecord {
        id: model.id,
        type_id: model.type_id,
        count: model.count,
        reference: model.reference,
        comment: model.comment,
    }
}

/// Convert an action row plus its resolved associations into a record
fn action_record(
    model: action::Model,
    pole_type_ids: Vec<i64>,
    media_ids: Vec<i64>,
    equipments: Vec<EquipmentRecord>,
) -> anyhow::Result<ActionRecord> {
    let kind: ActionKind = model.kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let detail = match kind {
        ActionKind::Diagnosis => ActionDetail::Diagnosis(DiagnosisFields {
            neutralized: model.neutralized.unwrap_or(false),
            condition_id: model.condition_id,
            isolation_advice: model.isolation_advice.unwrap_or(false),
            dissuasion_advice: model.dissuasion_advice.unwrap_or(false),
            attraction_advice: model.attraction_advice.unwrap_or(false),
            change_advice: model.change_advice.unwrap_or(false),
            technical_proposal: model.technical_proposal,
            pole_attractivity_id: model.pole_attractivity_id,
            pole_dangerousness_id: model.pole_dangerousness_id,
            sgmt_build_integr_risk_id: model.sgmt_build_integr_risk_id,
            sgmt_moving_risk_id: model.sgmt_moving_risk_id,
            sgmt_topo_integr_risk_id: model.sgmt_topo_integr_risk_id,
            sgmt_veget_integr_risk_id: model.sgmt_veget_integr_risk_id,
            pole_type_ids,
        }),
        ActionKind::Operation => ActionDetail::Operation(OperationFields {
            operation_type_id: model.operation_type_id,
            installed: model.installed,
            equipments,
        }),
    };
    Ok(ActionRecord {
        id: model.id,
        uuid: model.uuid,
        infrastructure_id: model.infrastructure_id,
        date: model.date,
        remark: model.remark,
        last: model.last,
        media_ids,
        detail,
    })
}

fn geo_area_record(model: geo_area::Model) -> anyhow::Result<GeoAreaRecord> {
    Ok(GeoAreaRecord {
        id: model.id,
        uuid: model.uuid,
        name: model.name,
        code: model.code,
        area_type: model.area_type,
        geom: Geometry::from_json(&model.geom)?,
    })
}

fn sensitive_area_record(model: sensitive_area::Model) -> anyhow::Result<SensitiveAreaRecord> {
    Ok(SensitiveAreaRecord {
        id: model.id,
        uuid: model.uuid,
        name: model.name,
        geom: Geometry::from_json(&model.geom)?,
    })
}

fn nomenclature_record(model: nomenclature::Model) -> NomenclatureRecord {
    NomenclatureRecord {
        id: model.id,
        code: model.code,
        mnemonic: model.mnemonic,
        label: model.label,
    }
}

fn media_record(model: media::Model) -> MediaRecord {
    MediaRecord {
        id: model.id,
        uuid: model.uuid,
        path: model.path,
        date: model.date,
        author: model.author,
        source: model.source,
        remark: model.remark,
    }
}

fn news_record(model: news::Model) -> NewsRecord {
    NewsRecord {
        id: model.id,
        title: model.title,
        teaser: model.teaser,
        body: model.body,
        date: model.date,
        private: model.private,
    }
}

fn partner_record(model: partner::Model) -> PartnerRecord {
    PartnerRecord {
        id: model.id,
        name: model.name,
        url: model.url,
        logo: model.logo,
    }
}

// ============================================================================
// PersistenceService implementation
// ============================================================================

#[async_trait]
impl PersistenceService for SqlPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}

// ============================================================================
// InfrastructurePersistence implementation
// ============================================================================

#[async_trait]
impl InfrastructurePersistence for SqlPersistService {
    async fn infrastructure_create(
        &self,
        new: &NewInfrastructure,
    ) -> anyhow::Result<InfrastructureRecord> {
        let geom = new.geom.as_ref().map(|g| g.to_json()).transpose()?;
        let entity = infrastructure::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            kind: Set(new.kind.as_str().to_string()),
            owner_id: Set(new.owner_id),
            geom: Set(geom),
            ..Default::default()
        };
        let model = entity.insert(&self.db).await?;

        // Fresh row, area sets are empty by construction
        infrastructure_record(model, Vec::new(), Vec::new())
    }

    async fn infrastructure_get(&self, id: i64) -> anyhow::Result<Option<InfrastructureRecord>> {
        match infrastructure::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.load_infrastructure(model).await?)),
            None => Ok(None),
        }
    }

    async fn infrastructure_find_all(
        &self,
        kind: Option<InfrastructureKind>,
    ) -> anyhow::Result<Vec<InfrastructureRecord>> {
        let mut query = infrastructure::Entity::find();
        if let Some(kind) = kind {
            query = query.filter(infrastructure::Column::Kind.eq(kind.as_str()));
        }
        let models = query.all(&self.db).await?;
        let mut records = Vec::with_capacity(models.len());
        for model in models {
            records.push(self.load_infrastructure(model).await?);
        }
        Ok(records)
    }

    async fn infrastructure_delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = infrastructure::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn infrastructure_set_geo_areas(
        &self,
        id: i64,
        geo_area_ids: &[i64],
    ) -> anyhow::Result<()> {
        infrastructure_geo_area::Entity::delete_many()
            .filter(infrastructure_geo_area::Column::InfrastructureId.eq(id))
            .exec(&self.db)
            .await?;
        if !geo_area_ids.is_empty() {
            let rows = geo_area_ids.iter().map(|&geo_area_id| {
                infrastructure_geo_area::ActiveModel {
                    infrastructure_id: Set(id),
                    geo_area_id: Set(geo_area_id),
                }
            });
            infrastructure_geo_area::Entity::insert_many(rows)
                .exec(&self.db)
                .await?;
        }
        Ok(())
    }

    async fn infrastructure_set_sensitive_areas(
        &self,
        id: i64,
        sensitive_area_ids: &[i64],
    ) -> anyhow::Result<()> {
        infrastructure_sensitive_area::Entity::delete_many()
            .filter(infrastructure_sensitive_area::Column::InfrastructureId.eq(id))
            .exec(&self.db)
            .await?;
        if !sensitive_area_ids.is_empty() {
            let rows = sensitive_area_ids.iter().map(|&sensitive_area_id| {
                infrastructure_sensitive_area::ActiveModel {
                    infrastructure_id: Set(id),
                    sensitive_area_id: Set(sensitive_area_id),
                }
            });
            infrastructure_sensitive_area::Entity::insert_many(rows)
                .exec(&self.db)
                .await?;
        }
        Ok(())
    }
}

// ============================================================================
// ActionPersistence implementation
// ============================================================================

#[async_trait]
impl ActionPersistence for SqlPersistService {
    async fn action_create(&self, new: &NewAction, last: bool) -> anyhow::Result<ActionRecord> {
        let mut entity = action::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            kind: Set(new.detail.kind().as_str().to_string()),
            infrastructure_id: Set(new.infrastructure_id),
            date: Set(new.date),
            remark: Set(new.remark.clone()),
            last: Set(last),
            ..Default::default()
        };
        match &new.detail {
            ActionDetail::Diagnosis(d) => {
                entity.neutralized = Set(Some(d.neutralized));
                entity.condition_id = Set(d.condition_id);
                entity.isolation_advice = Set(Some(d.isolation_advice));
                entity.dissuasion_advice = Set(Some(d.dissuasion_advice));
                entity.attraction_advice = Set(Some(d.attraction_advice));
                entity.change_advice = Set(Some(d.change_advice));
                entity.technical_proposal = Set(d.technical_proposal.clone());
                entity.pole_attractivity_id = Set(d.pole_attractivity_id);
                entity.pole_dangerousness_id = Set(d.pole_dangerousness_id);
                entity.sgmt_build_integr_risk_id = Set(d.sgmt_build_integr_risk_id);
                entity.sgmt_moving_risk_id = Set(d.sgmt_moving_risk_id);
                entity.sgmt_topo_integr_risk_id = Set(d.sgmt_topo_integr_risk_id);
                entity.sgmt_veget_integr_risk_id = Set(d.sgmt_veget_integr_risk_id);
            }
            ActionDetail::Operation(o) => {
                entity.operation_type_id = Set(o.operation_type_id);
                entity.installed = Set(o.installed);
            }
        }
        let model = entity.insert(&self.db).await?;

        // Fresh row, associations are attached separately
        action_record(model, Vec::new(), Vec::new(), Vec::new())
    }

    async fn action_get(&self, id: i64) -> anyhow::Result<Option<ActionRecord>> {
        match action::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.load_action(model).await?)),
            None => Ok(None),
        }
    }

    async fn action_find_all(
        &self,
        kind: Option<ActionKind>,
        infrastructure_id: Option<i64>,
    ) -> anyhow::Result<Vec<ActionRecord>> {
        let mut query = action::Entity::find();
        if let Some(kind) = kind {
            query = query.filter(action::Column::Kind.eq(kind.as_str()));
        }
        if let Some(infrastructure_id) = infrastructure_id {
            query = query.filter(action::Column::InfrastructureId.eq(infrastructure_id));
        }
        let models = query.all(&self.db).await?;
        let mut records = Vec::with_capacity(models.len());
        for model in models {
            records.push(self.load_action(model).await?);
        }
        Ok(records)
    }

    async fn action_find_current(
        &self,
        kind: ActionKind,
        infrastructure_id: i64,
    ) -> anyhow::Result<Vec<ActionRecord>> {
        let models = action::Entity::find()
            .filter(action::Column::Kind.eq(kind.as_str()))
            .filter(action::Column::InfrastructureId.eq(infrastructure_id))
            .filter(action::Column::Last.eq(true))
            .all(&self.db)
            .await?;
        let mut records = Vec::with_capacity(models.len());
        for model in models {
            records.push(self.load_action(model).await?);
        }
        Ok(records)
    }

    async fn action_set_last(&self, id: i64, last: bool) -> anyhow::Result<()> {
        action::Entity::update_many()
            .col_expr(action::Column::Last, Expr::value(last))
            .filter(action::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn action_set_pole_types(
        &self,
        id: i64,
        nomenclature_ids: &[i64],
    ) -> anyhow::Result<()> {
        action_pole_type::Entity::delete_many()
            .filter(action_pole_type::Column::ActionId.eq(id))
            .exec(&self.db)
            .await?;
        if !nomenclature_ids.is_empty() {
            let rows = nomenclature_ids
                .iter()
                .map(|&nomenclature_id| action_pole_type::ActiveModel {
                    action_id: Set(id),
                    nomenclature_id: Set(nomenclature_id),
                });
            action_pole_type::Entity::insert_many(rows).exec(&self.db).await?;
        }
        Ok(())
    }

    async fn action_set_media(&self, id: i64, media_ids: &[i64]) -> anyhow::Result<()> {
        action_media::Entity::delete_many()
            .filter(action_media::Column::ActionId.eq(id))
            .exec(&self.db)
            .await?;
        if !media_ids.is_empty() {
            let rows = media_ids.iter().map(|&media_id| action_media::ActiveModel {
                action_id: Set(id),
                media_id: Set(media_id),
            });
            action_media::Entity::insert_many(rows).exec(&self.db).await?;
        }
        Ok(())
    }

    async fn action_replace_equipments(
        &self,
        id: i64,
        equipments: &[NewEquipment],
    ) -> anyhow::Result<()> {
        equipment::Entity::delete_many()
            .filter(equipment::Column::ActionId.eq(id))
            .exec(&self.db)
            .await?;
        if !equipments.is_empty() {
            let rows = equipments.iter().map(|e| equipment::ActiveModel {
                action_id: Set(id),
                type_id: Set(e.type_id),
                count: Set(e.count),
                reference: Set(e.reference.clone()),
                comment: Set(e.comment.clone()),
                ..Default::default()
            });
            equipment::Entity::insert_many(rows).exec(&self.db).await?;
        }
        Ok(())
    }

    async fn action_delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = action::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

// ============================================================================
// AreaPersistence implementation
// ============================================================================

#[async_trait]
impl AreaPersistence for SqlPersistService {
    async fn geo_area_get(&self, id: i64) -> anyhow::Result<Option<GeoAreaRecord>> {
        geo_area::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(geo_area_record)
            .transpose()
    }

    async fn geo_area_find_all(&self) -> anyhow::Result<Vec<GeoAreaRecord>> {
        geo_area::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(geo_area_record)
            .collect()
    }

    async fn geo_areas_intersecting(&self, geom: &Geometry) -> anyhow::Result<Vec<i64>> {
        self.areas_intersecting("geo_area", geom).await
    }

    async fn sensitive_area_get(&self, id: i64) -> anyhow::Result<Option<SensitiveAreaRecord>> {
        sensitive_area::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(sensitive_area_record)
            .transpose()
    }

    async fn sensitive_area_find_all(&self) -> anyhow::Result<Vec<SensitiveAreaRecord>> {
        sensitive_area::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(sensitive_area_record)
            .collect()
    }

    async fn sensitive_areas_intersecting(&self, geom: &Geometry) -> anyhow::Result<Vec<i64>> {
        self.areas_intersecting("sensitive_area", geom).await
    }
}

// ============================================================================
// ContentPersistence implementation
// ============================================================================

#[async_trait]
impl ContentPersistence for SqlPersistService {
    async fn news_find_all(&self, include_private: bool) -> anyhow::Result<Vec<NewsRecord>> {
        let mut query = news::Entity::find();
        if !include_private {
            query = query.filter(news::Column::Private.eq(false));
        }
        Ok(query.all(&self.db).await?.into_iter().map(news_record).collect())
    }

    async fn news_get(&self, id: i64) -> anyhow::Result<Option<NewsRecord>> {
        Ok(news::Entity::find_by_id(id).one(&self.db).await?.map(news_record))
    }

    async fn news_create(&self, new: &NewNews) -> anyhow::Result<NewsRecord> {
        let entity = news::ActiveModel {
            title: Set(new.title.clone()),
            teaser: Set(new.teaser.clone()),
            body: Set(new.body.clone()),
            date: Set(new.date),
            private: Set(new.private),
            ..Default::default()
        };
        Ok(news_record(entity.insert(&self.db).await?))
    }

    async fn news_update(&self, id: i64, new: &NewNews) -> anyhow::Result<bool> {
        if let Some(model) = news::Entity::find_by_id(id).one(&self.db).await? {
            let mut entity: news::ActiveModel = model.into();
            entity.title = Set(new.title.clone());
            entity.teaser = Set(new.teaser.clone());
            entity.body = Set(new.body.clone());
            entity.date = Set(new.date);
            entity.private = Set(new.private);
            entity.update(&self.db).await?;
            return Ok(true);
        }
        Ok(false)
    }

    async fn news_delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = news::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn partner_find_all(&self) -> anyhow::Result<Vec<PartnerRecord>> {
        Ok(partner::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(partner_record)
            .collect())
    }

    async fn partner_get(&self, id: i64) -> anyhow::Result<Option<PartnerRecord>> {
        Ok(partner::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(partner_record))
    }

    async fn partner_create(&self, new: &NewPartner) -> anyhow::Result<PartnerRecord> {
        let entity = partner::ActiveModel {
            name: Set(new.name.clone()),
            url: Set(new.url.clone()),
            logo: Set(new.logo.clone()),
            ..Default::default()
        };
        Ok(partner_record(entity.insert(&self.db).await?))
    }

    async fn partner_update(&self, id: i64, new: &NewPartner) -> anyhow::Result<bool> {
        if let Some(model) = partner::Entity::find_by_id(id).one(&self.db).await? {
            let mut entity: partner::ActiveModel = model.into();
            entity.name = Set(new.name.clone());
            entity.url = Set(new.url.clone());
            entity.logo = Set(new.logo.clone());
            entity.update(&self.db).await?;
            return Ok(true);
        }
        Ok(false)
    }

    async fn partner_delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = partner::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn media_find_all(&self) -> anyhow::Result<Vec<MediaRecord>> {
        Ok(media::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(media_record)
            .collect())
    }

    async fn media_get(&self, id: i64) -> anyhow::Result<Option<MediaRecord>> {
        Ok(media::Entity::find_by_id(id).one(&self.db).await?.map(media_record))
    }

    async fn media_create(&self, new: &NewMedia) -> anyhow::Result<MediaRecord> {
        let entity = media::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            path: Set(new.path.clone()),
            date: Set(new.date),
            author: Set(new.author.clone()),
            source: Set(new.source.clone()),
            remark: Set(new.remark.clone()),
            ..Default::default()
        };
        Ok(media_record(entity.insert(&self.db).await?))
    }
}

// ============================================================================
// NomenclaturePersistence implementation
// ============================================================================

#[async_trait]
impl NomenclaturePersistence for SqlPersistService {
    async fn nomenclature_get(&self, id: i64) -> anyhow::Result<Option<NomenclatureRecord>> {
        Ok(nomenclature::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(nomenclature_record))
    }

    async fn nomenclature_find_all(
        &self,
        mnemonic: Option<&str>,
    ) -> anyhow::Result<Vec<NomenclatureRecord>> {
        let mut query = nomenclature::Entity::find();
        if let Some(mnemonic) = mnemonic {
            query = query.filter(nomenclature::Column::Mnemonic.eq(mnemonic));
        }
        Ok(query
            .all(&self.db)
            .await?
            .into_iter()
            .map(nomenclature_record)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point_model(kind: &str, geom: Option<&str>) -> infrastructure::Model {
        infrastructure::Model {
            id: 7,
            uuid: Uuid::new_v4(),
            kind: kind.to_string(),
            owner_id: 3,
            geom: geom.map(|g| g.to_string()),
        }
    }

    #[test]
    fn test_infrastructure_record_conversion() {
        let model = point_model("point", Some(r#"{"type":"Point","coordinates":[5.4,43.3]}"#));
        let record = infrastructure_record(model, vec![1, 2], vec![9]).unwrap();
        assert_eq!(record.kind, InfrastructureKind::Point);
        assert_eq!(record.geo_area_ids, vec![1, 2]);
        assert_eq!(record.sensitive_area_ids, vec![9]);
        assert!(record.geom.is_some());
    }

    #[test]
    fn test_infrastructure_record_rejects_unknown_kind() {
        let model = point_model("pylon", None);
        assert!(infrastructure_record(model, vec![], vec![]).is_err());
    }

    #[test]
    fn test_action_record_conversion_diagnosis() {
        let model = action::Model {
            id: 1,
            uuid: Uuid::new_v4(),
            kind: "diagnosis".to_string(),
            infrastructure_id: 7,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            remark: Some("first survey".to_string()),
            last: true,
            neutralized: Some(false),
            condition_id: Some(11),
            isolation_advice: Some(true),
            dissuasion_advice: None,
            attraction_advice: None,
            change_advice: None,
            technical_proposal: None,
            pole_attractivity_id: Some(12),
            pole_dangerousness_id: Some(13),
            sgmt_build_integr_risk_id: None,
            sgmt_moving_risk_id: None,
            sgmt_topo_integr_risk_id: None,
            sgmt_veget_integr_risk_id: None,
            operation_type_id: None,
            installed: None,
        };
        let record = action_record(model, vec![21], vec![31], vec![]).unwrap();
        assert_eq!(record.kind(), ActionKind::Diagnosis);
        assert!(record.last);
        assert_eq!(record.media_ids, vec![31]);
        match record.detail {
            ActionDetail::Diagnosis(d) => {
                assert_eq!(d.pole_type_ids, vec![21]);
                assert!(d.isolation_advice);
                assert!(!d.dissuasion_advice);
            }
            ActionDetail::Operation(_) => panic!("expected diagnosis detail"),
        }
    }
}
