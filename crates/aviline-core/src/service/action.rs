//! Action service: creation with current-record maintenance
//!
//! At most one action of each kind is the current record of an
//! infrastructure. Creating an action inserts the new row flagged as current,
//! demotes whatever was current for the same kind before, then attaches the
//! associated sets (pole types, equipments, media). If any step after the
//! insert fails, the new row is deleted and the previous current records get
//! their flag back.

use aviline_common::AvilineError;
use aviline_persistence::model::{
    ActionDetail, ActionKind, ActionRecord, NewAction, NewEquipment,
};
use aviline_persistence::traits::PersistenceService;

/// Create an action and make it the current record of its kind for its
/// infrastructure.
pub async fn create_action(
    persistence: &dyn PersistenceService,
    new: &NewAction,
) -> Result<ActionRecord, AvilineError> {
    if persistence
        .infrastructure_get(new.infrastructure_id)
        .await?
        .is_none()
    {
        return Err(AvilineError::not_found(
            "infrastructure",
            new.infrastructure_id,
        ));
    }

    let kind = new.detail.kind();
    let previous = persistence
        .action_find_current(kind, new.infrastructure_id)
        .await?;

    let created = persistence.action_create(new, true).await?;

    if let Err(err) = finalize(persistence, created.id, new, &previous).await {
        tracing::error!(
            action_id = created.id,
            "action attachment failed, rolling back: {err}"
        );
        rollback(persistence, created.id, &previous).await;
        let message = match kind {
            ActionKind::Diagnosis => "Issue with Diagnosis configuration. No Diagnosis created.",
            ActionKind::Operation => "Issue with Operation configuration. No Operation created.",
        };
        return Err(AvilineError::Configuration(message.to_string()));
    }

    persistence
        .action_get(created.id)
        .await?
        .ok_or_else(|| AvilineError::not_found("action", created.id))
}

/// Demote the previous current records and attach the new row's associations
async fn finalize(
    persistence: &dyn PersistenceService,
    created_id: i64,
    new: &NewAction,
    previous: &[ActionRecord],
) -> anyhow::Result<()> {
    for prev in previous {
        if prev.id != created_id {
            persistence.action_set_last(prev.id, false).await?;
        }
    }
    match &new.detail {
        ActionDetail::Diagnosis(d) => {
            persistence
                .action_set_pole_types(created_id, &d.pole_type_ids)
                .await?;
        }
        ActionDetail::Operation(o) => {
            let equipments: Vec<NewEquipment> = o
                .equipments
                .iter()
                .map(|e| NewEquipment {
                    type_id: e.type_id,
                    count: e.count,
                    reference: e.reference.clone(),
                    comment: e.comment.clone(),
                })
                .collect();
            persistence
                .action_replace_equipments(created_id, &equipments)
                .await?;
        }
    }
    persistence.action_set_media(created_id, &new.media_ids).await?;
    Ok(())
}

/// Compensating rollback: drop the new row, restore the previous flags.
/// Failures here are logged and swallowed, the caller already reports the
/// creation as failed.
async fn rollback(persistence: &dyn PersistenceService, created_id: i64, previous: &[ActionRecord]) {
    if let Err(err) = persistence.action_delete(created_id).await {
        tracing::error!(action_id = created_id, "rollback delete failed: {err}");
    }
    for prev in previous {
        if let Err(err) = persistence.action_set_last(prev.id, true).await {
            tracing::error!(action_id = prev.id, "rollback restore failed: {err}");
        }
    }
}

pub async fn get_action(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<ActionRecord, AvilineError> {
    persistence
        .action_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("action", id))
}

pub async fn find_actions(
    persistence: &dyn PersistenceService,
    kind: Option<ActionKind>,
    infrastructure_id: Option<i64>,
) -> Result<Vec<ActionRecord>, AvilineError> {
    Ok(persistence.action_find_all(kind, infrastructure_id).await?)
}

pub async fn delete_action(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<(), AvilineError> {
    if !persistence.action_delete(id).await? {
        return Err(AvilineError::not_found("action", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviline_common::Geometry;
    use aviline_persistence::memory::MemoryPersistService;
    use aviline_persistence::model::{
        DiagnosisFields, InfrastructureKind, NewInfrastructure, OperationFields,
    };
    use aviline_persistence::traits::{ActionPersistence, ContentPersistence, InfrastructurePersistence};
    use chrono::NaiveDate;

    async fn seed_point(service: &MemoryPersistService) -> i64 {
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        service
            .infrastructure_create(&NewInfrastructure {
                kind: InfrastructureKind::Point,
                owner_id: owner,
                geom: Some(Geometry::point(1.0, 1.0)),
            })
            .await
            .unwrap()
            .id
    }

    fn diagnosis(infrastructure_id: i64, day: u32) -> NewAction {
        NewAction {
            infrastructure_id,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            remark: None,
            media_ids: vec![],
            detail: ActionDetail::Diagnosis(DiagnosisFields::default()),
        }
    }

    fn operation(infrastructure_id: i64, day: u32) -> NewAction {
        NewAction {
            infrastructure_id,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            remark: None,
            media_ids: vec![],
            detail: ActionDetail::Operation(OperationFields::default()),
        }
    }

    #[tokio::test]
    async fn test_first_action_becomes_current() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        let record = create_action(&service, &diagnosis(infra, 1)).await.unwrap();
        assert!(record.last);
    }

    #[tokio::test]
    async fn test_new_action_demotes_previous_current() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        let first = create_action(&service, &diagnosis(infra, 1)).await.unwrap();
        let second = create_action(&service, &diagnosis(infra, 2)).await.unwrap();

        assert!(!get_action(&service, first.id).await.unwrap().last);
        assert!(get_action(&service, second.id).await.unwrap().last);

        let current = service
            .action_find_current(ActionKind::Diagnosis, infra)
            .await
            .unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, second.id);
    }

    #[tokio::test]
    async fn test_kinds_are_tracked_independently() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        let diag = create_action(&service, &diagnosis(infra, 1)).await.unwrap();
        let op = create_action(&service, &operation(infra, 2)).await.unwrap();

        assert!(get_action(&service, diag.id).await.unwrap().last);
        assert!(get_action(&service, op.id).await.unwrap().last);
    }

    #[tokio::test]
    async fn test_unknown_infrastructure_is_rejected() {
        let service = MemoryPersistService::new();
        let err = create_action(&service, &diagnosis(99, 1)).await.unwrap_err();
        assert!(matches!(err, AvilineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_attachment_failure_restores_previous_current() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        let first = create_action(&service, &diagnosis(infra, 1)).await.unwrap();
        service.fail_once("action_set_media");

        let err = create_action(&service, &diagnosis(infra, 2)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: Issue with Diagnosis configuration. No Diagnosis created."
        );

        // The failed row is gone and the old current record is back
        let all = find_actions(&service, None, Some(infra)).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, first.id);
        assert!(all[0].last);
    }

    #[tokio::test]
    async fn test_operation_attachment_failure_rolls_back() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        let first = create_action(&service, &operation(infra, 1)).await.unwrap();
        service.fail_once("action_replace_equipments");

        let err = create_action(&service, &operation(infra, 2)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: Issue with Operation configuration. No Operation created."
        );
        assert!(get_action(&service, first.id).await.unwrap().last);
    }

    #[tokio::test]
    async fn test_every_current_record_is_demoted_on_success() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        // Two rows flagged current at once, inserted below the service layer
        let stale_a = service.action_create(&diagnosis(infra, 1), true).await.unwrap();
        let stale_b = service.action_create(&diagnosis(infra, 2), true).await.unwrap();

        let record = create_action(&service, &diagnosis(infra, 3)).await.unwrap();

        assert!(!get_action(&service, stale_a.id).await.unwrap().last);
        assert!(!get_action(&service, stale_b.id).await.unwrap().last);
        let current = service
            .action_find_current(ActionKind::Diagnosis, infra)
            .await
            .unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, record.id);
    }

    #[tokio::test]
    async fn test_every_current_record_is_restored_on_failure() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        let stale_a = service.action_create(&diagnosis(infra, 1), true).await.unwrap();
        let stale_b = service.action_create(&diagnosis(infra, 2), true).await.unwrap();
        service.fail_once("action_set_media");

        assert!(create_action(&service, &diagnosis(infra, 3)).await.is_err());

        // The failed row is gone and both flags are back
        let all = find_actions(&service, None, Some(infra)).await.unwrap();
        assert_eq!(all.len(), 2);
        for id in [stale_a.id, stale_b.id] {
            assert!(get_action(&service, id).await.unwrap().last);
        }
    }

    #[tokio::test]
    async fn test_demote_failure_rolls_back_before_attachment() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;

        create_action(&service, &diagnosis(infra, 1)).await.unwrap();
        service.fail_once("action_set_last");

        assert!(create_action(&service, &diagnosis(infra, 2)).await.is_err());
        let current = service
            .action_find_current(ActionKind::Diagnosis, infra)
            .await
            .unwrap();
        assert_eq!(current.len(), 1);
    }

    #[tokio::test]
    async fn test_diagnosis_pole_types_and_media_are_attached() {
        let service = MemoryPersistService::new();
        let infra = seed_point(&service).await;
        let wood = service.seed_nomenclature("POLE_W", "pole_type", "Wood");
        let photo = service
            .media_create(&aviline_persistence::model::NewMedia {
                path: "media/p1.jpg".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                author: None,
                source: None,
                remark: None,
            })
            .await
            .unwrap();

        let mut new = diagnosis(infra, 1);
        new.media_ids = vec![photo.id];
        new.detail = ActionDetail::Diagnosis(DiagnosisFields {
            pole_type_ids: vec![wood],
            ..DiagnosisFields::default()
        });

        let record = create_action(&service, &new).await.unwrap();
        assert_eq!(record.media_ids, vec![photo.id]);
        match record.detail {
            ActionDetail::Diagnosis(d) => assert_eq!(d.pole_type_ids, vec![wood]),
            ActionDetail::Operation(_) => panic!("expected diagnosis detail"),
        }
    }
}
