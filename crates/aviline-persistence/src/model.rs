//! Domain record types used by the persistence traits
//!
//! Records are the backend-independent shape of stored rows, with the
//! many-to-many id sets already resolved. The polymorphic source models are
//! expressed as a shared base record plus a kind-specific payload enum, with
//! the discriminant used for dispatch at the serialization boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aviline_common::Geometry;

/// Storage backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// External PostgreSQL/PostGIS database
    #[default]
    ExternalDb,
    /// In-memory maps, single process
    Memory,
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::ExternalDb => write!(f, "external-db"),
            StorageMode::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "external-db" | "postgres" => Ok(StorageMode::ExternalDb),
            "memory" => Ok(StorageMode::Memory),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}

/// Infrastructure variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfrastructureKind {
    Point,
    Line,
}

impl InfrastructureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InfrastructureKind::Point => "point",
            InfrastructureKind::Line => "line",
        }
    }
}

impl std::fmt::Display for InfrastructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InfrastructureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(InfrastructureKind::Point),
            "line" => Ok(InfrastructureKind::Line),
            _ => Err(format!("Invalid infrastructure kind: {}", s)),
        }
    }
}

/// Action variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Diagnosis,
    Operation,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Diagnosis => "diagnosis",
            ActionKind::Operation => "operation",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diagnosis" => Ok(ActionKind::Diagnosis),
            "operation" => Ok(ActionKind::Operation),
            _ => Err(format!("Invalid action kind: {}", s)),
        }
    }
}

/// Classification term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomenclatureRecord {
    pub id: i64,
    pub code: String,
    pub mnemonic: String,
    pub label: String,
}

/// Administrative/natural area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAreaRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub area_type: Option<String>,
    pub geom: Geometry,
}

/// Sensitivity zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveAreaRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub geom: Geometry,
}

/// A tracked pole or line segment, with its attached area id sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub kind: InfrastructureKind,
    pub owner_id: i64,
    pub geom: Option<Geometry>,
    pub geo_area_ids: Vec<i64>,
    pub sensitive_area_ids: Vec<i64>,
}

/// Fields for a new infrastructure; the uuid and area sets are assigned by
/// the backend and the auto-attacher respectively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInfrastructure {
    pub kind: InfrastructureKind,
    pub owner_id: i64,
    pub geom: Option<Geometry>,
}

/// Diagnosis-specific action payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisFields {
    pub neutralized: bool,
    pub condition_id: Option<i64>,
    pub isolation_advice: bool,
    pub dissuasion_advice: bool,
    pub attraction_advice: bool,
    pub change_advice: bool,
    pub technical_proposal: Option<String>,
    pub pole_attractivity_id: Option<i64>,
    pub pole_dangerousness_id: Option<i64>,
    pub sgmt_build_integr_risk_id: Option<i64>,
    pub sgmt_moving_risk_id: Option<i64>,
    pub sgmt_topo_integr_risk_id: Option<i64>,
    pub sgmt_veget_integr_risk_id: Option<i64>,
    pub pole_type_ids: Vec<i64>,
}

/// Operation equipment line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: i64,
    pub type_id: i64,
    pub count: i32,
    pub reference: Option<String>,
    pub comment: Option<String>,
}

/// Fields for a new equipment line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEquipment {
    pub type_id: i64,
    pub count: i32,
    pub reference: Option<String>,
    pub comment: Option<String>,
}

/// Operation-specific action payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFields {
    pub operation_type_id: Option<i64>,
    pub installed: Option<bool>,
    pub equipments: Vec<EquipmentRecord>,
}

/// Kind-specific action payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionDetail {
    Diagnosis(DiagnosisFields),
    Operation(OperationFields),
}

impl ActionDetail {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionDetail::Diagnosis(_) => ActionKind::Diagnosis,
            ActionDetail::Operation(_) => ActionKind::Operation,
        }
    }
}

/// A stored action with its resolved associations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub infrastructure_id: i64,
    pub date: NaiveDate,
    pub remark: Option<String>,
    /// Current-record flag
    pub last: bool,
    pub media_ids: Vec<i64>,
    pub detail: ActionDetail,
}

impl ActionRecord {
    pub fn kind(&self) -> ActionKind {
        self.detail.kind()
    }
}

/// Fields for a new action. The current-record flag is decided by the
/// maintainer, the uuid by the backend. Many-to-many sets (pole types,
/// media) and equipment rows are attached in a separate step after the row
/// insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAction {
    pub infrastructure_id: i64,
    pub date: NaiveDate,
    pub remark: Option<String>,
    pub media_ids: Vec<i64>,
    pub detail: ActionDetail,
}

/// Stored media metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub path: String,
    pub date: NaiveDate,
    pub author: Option<String>,
    pub source: Option<String>,
    pub remark: Option<String>,
}

/// Fields for a new media row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedia {
    pub path: String,
    pub date: NaiveDate,
    pub author: Option<String>,
    pub source: Option<String>,
    pub remark: Option<String>,
}

/// News item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub id: i64,
    pub title: String,
    pub teaser: Option<String>,
    pub body: String,
    pub date: NaiveDate,
    pub private: bool,
}

/// Fields for a new or updated news item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub teaser: Option<String>,
    pub body: String,
    pub date: NaiveDate,
    pub private: bool,
}

/// Partner item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
    pub logo: Option<String>,
}

/// Fields for a new or updated partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartner {
    pub name: String,
    pub url: Option<String>,
    pub logo: Option<String>,
}
