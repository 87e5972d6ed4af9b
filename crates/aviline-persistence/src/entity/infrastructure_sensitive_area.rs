//! Join table: infrastructure <-> sensitivity zone
//!
//! Populated only by the area auto-attacher at infrastructure creation time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "infrastructure_sensitive_area")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub infrastructure_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sensitive_area_id: i64,
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
    #[sea_orm(
        belongs_to = "super::sensitive_area::Entity",
        from = "Column::SensitiveAreaId",
        to = "super::sensitive_area::Column::Id",
        on_delete = "Cascade"
    )]
    SensitiveArea,
}

impl ActiveModelBehavior for ActiveModel {}
