//! Administrative/natural area entity
//!
//! Read-only from the core's perspective: rows are loaded by an external
//! import process, and infrastructures get attached to them at creation time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "geo_area")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub name: String,
    #[sea_orm(nullable)]
    pub code: Option<String>,
    /// Area category (e.g. "commune", "departement", "znieff")
    #[sea_orm(nullable)]
    pub area_type: Option<String>,
    /// Polygon or multipolygon as GeoJSON text, SRID 4326
    #[sea_orm(column_type = "Text")]
    pub geom: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::infrastructure::Entity> for Entity {
    fn to() -> RelationDef {
        super::infrastructure_geo_area::Relation::Infrastructure.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::infrastructure_geo_area::Relation::GeoArea
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
