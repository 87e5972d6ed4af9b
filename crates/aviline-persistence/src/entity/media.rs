//! Media entity: metadata of a stored picture attached to actions.
//!
//! The upload pipeline itself is out of scope; only the rows and their
//! associations are managed here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    /// Storage path of the picture, relative to the media root
    pub path: String,
    pub date: Date,
    #[sea_orm(nullable)]
    pub author: Option<String>,
    #[sea_orm(nullable)]
    pub source: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        super::action_media::Relation::Action.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::action_media::Relation::Media.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
