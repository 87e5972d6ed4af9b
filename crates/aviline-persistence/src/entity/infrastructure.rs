//! Infrastructure entity: a tracked pole ("point") or power-line segment
//! ("line"), flattened into one table with a `kind` discriminant.
//!
//! `uuid` is a stable external identifier, distinct from the surrogate
//! primary key, usable when data is gathered from various origins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "infrastructure")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    /// Variant discriminant: "point" or "line"
    pub kind: String,
    /// Owner classification term (nomenclature of type "owner")
    pub owner_id: i64,
    /// Point or line string as GeoJSON text, SRID 4326.
    /// Mandatory for points, optional for lines.
    #[sea_orm(column_type = "Text", nullable)]
    pub geom: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::nomenclature::Entity",
        from = "Column::OwnerId",
        to = "super::nomenclature::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::action::Entity")]
    Action,
}

impl Related<super::nomenclature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Action.def()
    }
}

impl Related<super::geo_area::Entity> for Entity {
    fn to() -> RelationDef {
        super::infrastructure_geo_area::Relation::GeoArea.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::infrastructure_geo_area::Relation::Infrastructure
                .def()
                .rev(),
        )
    }
}

impl Related<super::sensitive_area::Entity> for Entity {
    fn to() -> RelationDef {
        super::infrastructure_sensitive_area::Relation::SensitiveArea.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::infrastructure_sensitive_area::Relation::Infrastructure
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
