//! Action entity: a dated record of examination (diagnosis) or remediation
//! work (operation) against an infrastructure.
//!
//! Both action kinds live in one table with a `kind` discriminant; the
//! kind-specific columns are nullable and only populated for the matching
//! kind. `last` flags the current record of its kind for the referenced
//! infrastructure; the current-record maintainer keeps at most one row per
//! (infrastructure, kind) flagged. This is advisory, not a DB constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    /// Variant discriminant: "diagnosis" or "operation"
    pub kind: String,
    pub infrastructure_id: i64,
    pub date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
    /// Current-record flag
    pub last: bool,

    // Diagnosis-specific columns
    #[sea_orm(nullable)]
    pub neutralized: Option<bool>,
    #[sea_orm(nullable)]
    pub condition_id: Option<i64>,
    #[sea_orm(nullable)]
    pub isolation_advice: Option<bool>,
    #[sea_orm(nullable)]
    pub dissuasion_advice: Option<bool>,
    #[sea_orm(nullable)]
    pub attraction_advice: Option<bool>,
    #[sea_orm(nullable)]
    pub change_advice: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub technical_proposal: Option<String>,
    #[sea_orm(nullable)]
    pub pole_attractivity_id: Option<i64>,
    #[sea_orm(nullable)]
    pub pole_dangerousness_id: Option<i64>,
    #[sea_orm(nullable)]
    pub sgmt_build_integr_risk_id: Option<i64>,
    #[sea_orm(nullable)]
    pub sgmt_moving_risk_id: Option<i64>,
    #[sea_orm(nullable)]
    pub sgmt_topo_integr_risk_id: Option<i64>,
    #[sea_orm(nullable)]
    pub sgmt_veget_integr_risk_id: Option<i64>,

    // Operation-specific columns
    #[sea_orm(nullable)]
    pub operation_type_id: Option<i64>,
    #[sea_orm(nullable)]
    pub installed: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::infrastructure::Entity",
        from = "Column::InfrastructureId",
        to = "super::infrastructure::Column::Id",
        on_delete = "Cascade"
    )]
    Infrastructure,
    #[sea_orm(has_many = "super::equipment::Entity")]
    Equipment,
}

impl Related<super::infrastructure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Infrastructure.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl Related<super::media::Entity> for Entity {
    fn to() -> RelationDef {
        super::action_media::Relation::Media.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::action_media::Relation::Action.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
