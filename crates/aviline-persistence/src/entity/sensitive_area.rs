//! Sensitivity zone entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sensitive_area")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub name: String,
    /// Polygon or multipolygon as GeoJSON text, SRID 4326
    #[sea_orm(column_type = "Text")]
    pub geom: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::infrastructure::Entity> for Entity {
    fn to() -> RelationDef {
        super::infrastructure_sensitive_area::Relation::Infrastructure.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::infrastructure_sensitive_area::Relation::SensitiveArea
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
