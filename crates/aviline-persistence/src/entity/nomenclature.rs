//! Nomenclature entity: classification terms (owner, condition, risk level,
//! operation type, pole type). Read-only reference data.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "nomenclature")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short code of the term (e.g. "ENEDIS", "GOOD", "HIGH")
    pub code: String,
    /// Mnemonic of the owning nomenclature type
    /// (e.g. "owner", "infrastr_condition", "risk_level", "operation_type")
    pub mnemonic: String,
    pub label: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
