//! Action persistence trait
//!
//! The row insert and the many-to-many attachment are deliberately separate
//! operations: the current-record maintainer needs the intermediate states to
//! run its compensating rollback.

use async_trait::async_trait;

use crate::model::{ActionKind, ActionRecord, NewAction, NewEquipment};

/// Action storage operations
#[async_trait]
pub trait ActionPersistence: Send + Sync {
    /// Insert a new action row with the given current-record flag and a fresh
    /// uuid. Many-to-many sets and equipment rows are NOT attached here.
    async fn action_create(&self, new: &NewAction, last: bool) -> anyhow::Result<ActionRecord>;

    /// Get an action by its surrogate id
    async fn action_get(&self, id: i64) -> anyhow::Result<Option<ActionRecord>>;

    /// Find all actions, optionally restricted by kind and/or infrastructure
    async fn action_find_all(
        &self,
        kind: Option<ActionKind>,
        infrastructure_id: Option<i64>,
    ) -> anyhow::Result<Vec<ActionRecord>>;

    /// Find the actions of the given kind for an infrastructure currently
    /// flagged as current. Should be at most one, but pre-existing
    /// inconsistencies can yield several.
    async fn action_find_current(
        &self,
        kind: ActionKind,
        infrastructure_id: i64,
    ) -> anyhow::Result<Vec<ActionRecord>>;

    /// Set the current-record flag on one action row
    async fn action_set_last(&self, id: i64, last: bool) -> anyhow::Result<()>;

    /// Replace the pole-type nomenclature set of a diagnosis
    async fn action_set_pole_types(
        &self,
        id: i64,
        nomenclature_ids: &[i64],
    ) -> anyhow::Result<()>;

    /// Replace the media set of an action
    async fn action_set_media(&self, id: i64, media_ids: &[i64]) -> anyhow::Result<()>;

    /// Replace the equipment line items of an operation
    async fn action_replace_equipments(
        &self,
        id: i64,
        equipments: &[NewEquipment],
    ) -> anyhow::Result<()>;

    /// Delete an action row (used by the rollback path)
    async fn action_delete(&self, id: i64) -> anyhow::Result<bool>;
}
