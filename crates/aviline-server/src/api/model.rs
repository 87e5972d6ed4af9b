//! API request and response models
//!
//! Infrastructures and areas are returned as GeoJSON features so they drop
//! straight onto a map client. The remaining resources use their record
//! shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aviline_common::Geometry;
use aviline_persistence::model::{
    ActionDetail, DiagnosisFields, EquipmentRecord, GeoAreaRecord, InfrastructureKind,
    InfrastructureRecord, NewAction, NewInfrastructure, NewsRecord, OperationFields,
    SensitiveAreaRecord,
};

// ============================================================================
// GeoJSON feature views
// ============================================================================

/// GeoJSON feature wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub id: i64,
    pub geometry: Option<Geometry>,
    pub properties: P,
}

impl<P> Feature<P> {
    fn new(id: i64, geometry: Option<Geometry>, properties: P) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            id,
            geometry,
            properties,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureProperties {
    pub uuid: Uuid,
    pub kind: InfrastructureKind,
    pub owner_id: i64,
    pub geo_area_ids: Vec<i64>,
    pub sensitive_area_ids: Vec<i64>,
}

pub type InfrastructureFeature = Feature<InfrastructureProperties>;

impl From<InfrastructureRecord> for InfrastructureFeature {
    fn from(record: InfrastructureRecord) -> Self {
        Feature::new(
            record.id,
            record.geom,
            InfrastructureProperties {
                uuid: record.uuid,
                kind: record.kind,
                owner_id: record.owner_id,
                geo_area_ids: record.geo_area_ids,
                sensitive_area_ids: record.sensitive_area_ids,
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoAreaProperties {
    pub uuid: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub area_type: Option<String>,
}

pub type GeoAreaFeature = Feature<GeoAreaProperties>;

impl From<GeoAreaRecord> for GeoAreaFeature {
    fn from(record: GeoAreaRecord) -> Self {
        Feature::new(
            record.id,
            Some(record.geom),
            GeoAreaProperties {
                uuid: record.uuid,
                name: record.name,
                code: record.code,
                area_type: record.area_type,
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveAreaProperties {
    pub uuid: Uuid,
    pub name: String,
}

pub type SensitiveAreaFeature = Feature<SensitiveAreaProperties>;

impl From<SensitiveAreaRecord> for SensitiveAreaFeature {
    fn from(record: SensitiveAreaRecord) -> Self {
        Feature::new(
            record.id,
            Some(record.geom),
            SensitiveAreaProperties {
                uuid: record.uuid,
                name: record.name,
            },
        )
    }
}

// ============================================================================
// Infrastructure requests
// ============================================================================

/// Payload for creating a pole
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePointRequest {
    pub owner_id: i64,
    pub geometry: Option<Geometry>,
}

impl CreatePointRequest {
    pub fn into_new(self) -> NewInfrastructure {
        NewInfrastructure {
            kind: InfrastructureKind::Point,
            owner_id: self.owner_id,
            geom: self.geometry,
        }
    }
}

/// Payload for creating a line segment. The geometry is optional, a segment
/// can be registered before it has been surveyed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLineRequest {
    pub owner_id: i64,
    pub geometry: Option<Geometry>,
}

impl CreateLineRequest {
    pub fn into_new(self) -> NewInfrastructure {
        NewInfrastructure {
            kind: InfrastructureKind::Line,
            owner_id: self.owner_id,
            geom: self.geometry,
        }
    }
}

// ============================================================================
// Action requests
// ============================================================================

/// Payload for creating a diagnosis
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDiagnosisRequest {
    pub infrastructure_id: i64,
    pub date: NaiveDate,
    pub remark: Option<String>,
    #[serde(default)]
    pub media_ids: Vec<i64>,
    #[serde(default)]
    pub neutralized: bool,
    pub condition_id: Option<i64>,
    #[serde(default)]
    pub isolation_advice: bool,
    #[serde(default)]
    pub dissuasion_advice: bool,
    #[serde(default)]
    pub attraction_advice: bool,
    #[serde(default)]
    pub change_advice: bool,
    pub technical_proposal: Option<String>,
    pub pole_attractivity_id: Option<i64>,
    pub pole_dangerousness_id: Option<i64>,
    pub sgmt_build_integr_risk_id: Option<i64>,
    pub sgmt_moving_risk_id: Option<i64>,
    pub sgmt_topo_integr_risk_id: Option<i64>,
    pub sgmt_veget_integr_risk_id: Option<i64>,
    #[serde(default)]
    pub pole_type_ids: Vec<i64>,
}

impl CreateDiagnosisRequest {
    pub fn into_new(self) -> NewAction {
        NewAction {
            infrastructure_id: self.infrastructure_id,
            date: self.date,
            remark: self.remark,
            media_ids: self.media_ids,
            detail: ActionDetail::Diagnosis(DiagnosisFields {
                neutralized: self.neutralized,
                condition_id: self.condition_id,
                isolation_advice: self.isolation_advice,
                dissuasion_advice: self.dissuasion_advice,
                attraction_advice: self.attraction_advice,
                change_advice: self.change_advice,
                technical_proposal: self.technical_proposal,
                pole_attractivity_id: self.pole_attractivity_id,
                pole_dangerousness_id: self.pole_dangerousness_id,
                sgmt_build_integr_risk_id: self.sgmt_build_integr_risk_id,
                sgmt_moving_risk_id: self.sgmt_moving_risk_id,
                sgmt_topo_integr_risk_id: self.sgmt_topo_integr_risk_id,
                sgmt_veget_integr_risk_id: self.sgmt_veget_integr_risk_id,
                pole_type_ids: self.pole_type_ids,
            }),
        }
    }
}

/// Equipment line item inside an operation payload
#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentPayload {
    pub type_id: i64,
    pub count: i32,
    pub reference: Option<String>,
    pub comment: Option<String>,
}

/// Payload for creating an operation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOperationRequest {
    pub infrastructure_id: i64,
    pub date: NaiveDate,
    pub remark: Option<String>,
    #[serde(default)]
    pub media_ids: Vec<i64>,
    pub operation_type_id: Option<i64>,
    pub installed: Option<bool>,
    #[serde(default)]
    pub equipments: Vec<EquipmentPayload>,
}

impl CreateOperationRequest {
    pub fn into_new(self) -> NewAction {
        NewAction {
            infrastructure_id: self.infrastructure_id,
            date: self.date,
            remark: self.remark,
            media_ids: self.media_ids,
            detail: ActionDetail::Operation(OperationFields {
                operation_type_id: self.operation_type_id,
                installed: self.installed,
                equipments: self
                    .equipments
                    .into_iter()
                    .map(|e| EquipmentRecord {
                        id: 0,
                        type_id: e.type_id,
                        count: e.count,
                        reference: e.reference,
                        comment: e.comment,
                    })
                    .collect(),
            }),
        }
    }
}

// ============================================================================
// Content views
// ============================================================================

/// Listing view of a news item, without the article body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSummary {
    pub id: i64,
    pub title: String,
    pub teaser: Option<String>,
    pub date: NaiveDate,
    pub private: bool,
}

impl From<NewsRecord> for NewsSummary {
    fn from(record: NewsRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            teaser: record.teaser,
            date: record.date,
            private: record.private,
        }
    }
}

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ActionListParams {
    pub infrastructure_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewsListParams {
    #[serde(default)]
    pub simple: bool,
}

#[derive(Debug, Deserialize)]
pub struct NomenclatureListParams {
    pub mnemonic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_feature_shape() {
        let record = InfrastructureRecord {
            id: 5,
            uuid: Uuid::new_v4(),
            kind: InfrastructureKind::Point,
            owner_id: 2,
            geom: Some(Geometry::point(5.37, 43.29)),
            geo_area_ids: vec![1],
            sensitive_area_ids: vec![],
        };
        let feature = InfrastructureFeature::from(record);
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "Point");
        assert_eq!(json["properties"]["kind"], "point");
    }

    #[test]
    fn test_diagnosis_request_defaults() {
        let request: CreateDiagnosisRequest = serde_json::from_value(serde_json::json!({
            "infrastructure_id": 3,
            "date": "2024-06-01"
        }))
        .unwrap();
        let new = request.into_new();
        match new.detail {
            ActionDetail::Diagnosis(d) => {
                assert!(!d.neutralized);
                assert!(d.pole_type_ids.is_empty());
            }
            ActionDetail::Operation(_) => panic!("expected diagnosis detail"),
        }
    }
}
