//! Health endpoint

use actix_web::{Responder, Scope, get, web};
use serde::Serialize;

use crate::model::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub storage: String,
}

#[get("")]
pub async fn health(data: web::Data<AppState>) -> impl Responder {
    let storage = data.persistence.storage_mode().to_string();
    match data.persistence.health_check().await {
        Ok(()) => ApiResult::http_success(HealthStatus {
            status: "UP",
            storage,
        }),
        Err(err) => {
            tracing::error!("storage health check failed: {err}");
            ApiResult::<HealthStatus>::http_response(
                503,
                aviline_common::SERVER_ERROR.code,
                "storage unavailable".to_string(),
                HealthStatus {
                    status: "DOWN",
                    storage,
                },
            )
        }
    }
}

pub fn routes() -> Scope {
    web::scope("/health").service(health)
}
