//! Infrastructure service: creation with area auto-attachment
//!
//! Creating a pole or line segment walks a multi-step protocol: insert the
//! row, query the areas its geometry intersects, then replace both area sets
//! with the query results. If anything after the insert fails, the new row is
//! deleted again and the whole creation is reported as failed, so no
//! half-attached infrastructure survives.

use aviline_common::{AvilineError, Geometry};
use aviline_persistence::model::{InfrastructureKind, InfrastructureRecord, NewInfrastructure};
use aviline_persistence::traits::PersistenceService;

/// Create an infrastructure and attach it to every intersecting
/// administrative area and sensitivity zone.
///
/// Points must carry a geometry. Lines may be created without one, in which
/// case no spatial query runs and both area sets stay empty.
pub async fn create_infrastructure(
    persistence: &dyn PersistenceService,
    new: &NewInfrastructure,
) -> Result<InfrastructureRecord, AvilineError> {
    if new.kind == InfrastructureKind::Point && new.geom.is_none() {
        return Err(AvilineError::IllegalArgument(
            "point geometry is required".to_string(),
        ));
    }

    let created = persistence.infrastructure_create(new).await?;

    if let Some(geom) = &new.geom {
        if let Err(err) = attach_areas(persistence, created.id, geom).await {
            tracing::error!(
                infrastructure_id = created.id,
                "area attachment failed, rolling back: {err}"
            );
            if let Err(err) = persistence.infrastructure_delete(created.id).await {
                tracing::error!(
                    infrastructure_id = created.id,
                    "rollback delete failed: {err}"
                );
            }
            let message = match new.kind {
                InfrastructureKind::Point => {
                    "Issue with attachment from new point to sensitive/geo areas. No Point created."
                }
                InfrastructureKind::Line => {
                    "Issue with attachment from new Line to sensitive/geo areas. No Line created."
                }
            };
            return Err(AvilineError::Configuration(message.to_string()));
        }
    }

    persistence
        .infrastructure_get(created.id)
        .await?
        .ok_or_else(|| AvilineError::not_found("infrastructure", created.id))
}

/// Replace both area sets of an infrastructure with the areas its geometry
/// intersects. Full replace, not additive.
async fn attach_areas(
    persistence: &dyn PersistenceService,
    id: i64,
    geom: &Geometry,
) -> anyhow::Result<()> {
    let geo_area_ids = persistence.geo_areas_intersecting(geom).await?;
    let sensitive_area_ids = persistence.sensitive_areas_intersecting(geom).await?;
    persistence.infrastructure_set_geo_areas(id, &geo_area_ids).await?;
    persistence
        .infrastructure_set_sensitive_areas(id, &sensitive_area_ids)
        .await?;
    Ok(())
}

pub async fn get_infrastructure(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<InfrastructureRecord, AvilineError> {
    persistence
        .infrastructure_get(id)
        .await?
        .ok_or_else(|| AvilineError::not_found("infrastructure", id))
}

pub async fn find_infrastructures(
    persistence: &dyn PersistenceService,
    kind: Option<InfrastructureKind>,
) -> Result<Vec<InfrastructureRecord>, AvilineError> {
    Ok(persistence.infrastructure_find_all(kind).await?)
}

pub async fn delete_infrastructure(
    persistence: &dyn PersistenceService,
    id: i64,
) -> Result<(), AvilineError> {
    if !persistence.infrastructure_delete(id).await? {
        return Err(AvilineError::not_found("infrastructure", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviline_persistence::memory::MemoryPersistService;

    fn square(x: f64, y: f64, side: f64) -> Geometry {
        Geometry::polygon(vec![
            [x, y],
            [x + side, y],
            [x + side, y + side],
            [x, y + side],
            [x, y],
        ])
    }

    fn new_point(owner_id: i64, geom: Option<Geometry>) -> NewInfrastructure {
        NewInfrastructure {
            kind: InfrastructureKind::Point,
            owner_id,
            geom,
        }
    }

    #[tokio::test]
    async fn test_point_requires_geometry() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");

        let err = create_infrastructure(&service, &new_point(owner, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AvilineError::IllegalArgument(_)));
        assert!(find_infrastructures(&service, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_point_attaches_to_intersecting_areas() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        // Two overlapping administrative polygons cover the point, a third
        // does not
        let commune = service.seed_geo_area("commune", square(0.0, 0.0, 4.0));
        let department = service.seed_geo_area("department", square(1.0, 1.0, 8.0));
        let _far = service.seed_geo_area("elsewhere", square(10.0, 10.0, 2.0));
        let reserve = service.seed_sensitive_area("reserve", square(1.0, 1.0, 4.0));

        let record = create_infrastructure(
            &service,
            &new_point(owner, Some(Geometry::point(2.0, 2.0))),
        )
        .await
        .unwrap();

        assert_eq!(record.geo_area_ids, vec![commune, department]);
        assert_eq!(record.sensitive_area_ids, vec![reserve]);
    }

    #[tokio::test]
    async fn test_line_without_geometry_skips_spatial_queries() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        service.seed_geo_area("commune", square(0.0, 0.0, 4.0));

        let record = create_infrastructure(
            &service,
            &NewInfrastructure {
                kind: InfrastructureKind::Line,
                owner_id: owner,
                geom: None,
            },
        )
        .await
        .unwrap();

        assert!(record.geo_area_ids.is_empty());
        assert!(record.sensitive_area_ids.is_empty());
        assert_eq!(service.call_count("geo_areas_intersecting"), 0);
        assert_eq!(service.call_count("sensitive_areas_intersecting"), 0);
    }

    #[tokio::test]
    async fn test_line_attaches_along_its_path() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        let crossed = service.seed_geo_area("crossed", square(2.0, -1.0, 2.0));
        let _missed = service.seed_geo_area("missed", square(10.0, 10.0, 2.0));

        let record = create_infrastructure(
            &service,
            &NewInfrastructure {
                kind: InfrastructureKind::Line,
                owner_id: owner,
                geom: Some(Geometry::line_string(vec![[0.0, 0.0], [6.0, 0.0]])),
            },
        )
        .await
        .unwrap();

        assert_eq!(record.geo_area_ids, vec![crossed]);
    }

    #[tokio::test]
    async fn test_attachment_failure_deletes_new_point() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        service.seed_geo_area("commune", square(0.0, 0.0, 4.0));
        service.fail_once("infrastructure_set_sensitive_areas");

        let err = create_infrastructure(
            &service,
            &new_point(owner, Some(Geometry::point(2.0, 2.0))),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "configuration error: Issue with attachment from new point to sensitive/geo areas. No Point created."
        );
        assert!(find_infrastructures(&service, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_attachment_failure_deletes_new_line() {
        let service = MemoryPersistService::new();
        let owner = service.seed_nomenclature("OWNER1", "owner", "Owner");
        service.fail_once("geo_areas_intersecting");

        let err = create_infrastructure(
            &service,
            &NewInfrastructure {
                kind: InfrastructureKind::Line,
                owner_id: owner,
                geom: Some(Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]])),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "configuration error: Issue with attachment from new Line to sensitive/geo areas. No Line created."
        );
        assert!(find_infrastructures(&service, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_infrastructure() {
        let service = MemoryPersistService::new();
        let err = delete_infrastructure(&service, 99).await.unwrap_err();
        assert!(matches!(err, AvilineError::NotFound(_)));
    }
}
