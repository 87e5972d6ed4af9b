//! V1 routing configuration

use actix_web::{Scope, web};

use super::{actions, areas, cables, content, health, nomenclature};

/// Create the v1 API routes
pub fn routes() -> Scope {
    web::scope("/api/v1")
        .service(
            cables::routes()
                .service(actions::routes())
                .service(actions::diagnosis_routes())
                .service(actions::operation_routes()),
        )
        .service(areas::geo_area_routes())
        .service(areas::sensitive_area_routes())
        .service(content::news_routes())
        .service(content::partner_routes())
        .service(content::media_routes())
        .service(nomenclature::routes())
        .service(health::routes())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::json;

    use aviline_common::Geometry;
    use aviline_persistence::MemoryPersistService;
    use aviline_persistence::traits::PersistenceService;

    use crate::model::{AppState, Configuration};

    use super::routes;

    fn app_state(memory: &Arc<MemoryPersistService>) -> web::Data<AppState> {
        let persistence: Arc<dyn PersistenceService> = memory.clone();
        web::Data::from(Arc::new(AppState {
            configuration: Configuration::default(),
            persistence,
        }))
    }

    fn square(x: f64, y: f64, side: f64) -> Geometry {
        Geometry::polygon(vec![
            [x, y],
            [x + side, y],
            [x + side, y + side],
            [x, y + side],
            [x, y],
        ])
    }

    #[actix_web::test]
    async fn test_health_reports_memory_storage() {
        let memory = Arc::new(MemoryPersistService::new());
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "UP");
        assert_eq!(body["data"]["storage"], "memory");
    }

    #[actix_web::test]
    async fn test_create_point_attaches_areas() {
        let memory = Arc::new(MemoryPersistService::new());
        let owner = memory.seed_nomenclature("OWNER1", "owner", "Owner");
        let commune = memory.seed_geo_area("commune", square(0.0, 0.0, 4.0));
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cables/points")
            .set_json(json!({
                "owner_id": owner,
                "geometry": {"type": "Point", "coordinates": [2.0, 2.0]}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["type"], "Feature");
        assert_eq!(body["data"]["properties"]["geo_area_ids"][0], commune);
    }

    #[actix_web::test]
    async fn test_create_point_without_geometry_is_rejected() {
        let memory = Arc::new(MemoryPersistService::new());
        let owner = memory.seed_nomenclature("OWNER1", "owner", "Owner");
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cables/points")
            .set_json(json!({"owner_id": owner}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_second_diagnosis_takes_over_current_flag() {
        let memory = Arc::new(MemoryPersistService::new());
        let owner = memory.seed_nomenclature("OWNER1", "owner", "Owner");
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cables/points")
            .set_json(json!({
                "owner_id": owner,
                "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}
            }))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        let infrastructure_id = body["data"]["id"].as_i64().unwrap();

        for date in ["2024-06-01", "2024-06-02"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/cables/diagnoses")
                .set_json(json!({"infrastructure_id": infrastructure_id, "date": date}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/cables/diagnoses?infrastructure_id={infrastructure_id}"
            ))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        let records = body["data"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        let current: Vec<_> = records.iter().filter(|r| r["last"] == true).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0]["date"], "2024-06-02");
    }

    #[actix_web::test]
    async fn test_unknown_infrastructure_returns_404() {
        let memory = Arc::new(MemoryPersistService::new());
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cables/operations")
            .set_json(json!({"infrastructure_id": 404, "date": "2024-06-01"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_private_news_requires_authorization_header() {
        let memory = Arc::new(MemoryPersistService::new());
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        for (title, private) in [("public", false), ("members", true)] {
            let req = test::TestRequest::post()
                .uri("/api/v1/news")
                .set_json(json!({
                    "title": title,
                    "teaser": null,
                    "body": "body",
                    "date": "2024-01-05",
                    "private": private
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/api/v1/news").to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/news")
            .insert_header(("Authorization", "Bearer token"))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_simple_news_listing_omits_body() {
        let memory = Arc::new(MemoryPersistService::new());
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/news")
            .set_json(json!({
                "title": "storks back",
                "teaser": "they nest again",
                "body": "long article",
                "date": "2024-03-12",
                "private": false
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/news?simple=true")
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        let item = &body["data"][0];
        assert_eq!(item["title"], "storks back");
        assert!(item.get("body").is_none());
    }

    #[actix_web::test]
    async fn test_point_id_is_invisible_through_line_endpoints() {
        let memory = Arc::new(MemoryPersistService::new());
        let owner = memory.seed_nomenclature("OWNER1", "owner", "Owner");
        let app =
            test::init_service(App::new().app_data(app_state(&memory)).service(routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cables/points")
            .set_json(json!({
                "owner_id": owner,
                "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}
            }))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/cables/lines/{id}"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
