//! Area endpoints: administrative areas and sensitivity zones
//!
//! Read-only reference layers. Infrastructure membership is maintained by
//! the auto-attacher at creation time, not through these endpoints.

use actix_web::{Responder, Scope, get, web};

use aviline_core::service::area;

use crate::api::model::{GeoAreaFeature, SensitiveAreaFeature};
use crate::model::{ApiResult, AppState};

#[get("")]
pub async fn list_geo_areas(data: web::Data<AppState>) -> impl Responder {
    match area::find_geo_areas(data.persistence()).await {
        Ok(records) => ApiResult::http_success(
            records
                .into_iter()
                .map(GeoAreaFeature::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_geo_area(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match area::get_geo_area(data.persistence(), path.into_inner()).await {
        Ok(record) => ApiResult::http_success(GeoAreaFeature::from(record)),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn geo_area_routes() -> Scope {
    web::scope("/geo-areas")
        .service(list_geo_areas)
        .service(get_geo_area)
}

#[get("")]
pub async fn list_sensitive_areas(data: web::Data<AppState>) -> impl Responder {
    match area::find_sensitive_areas(data.persistence()).await {
        Ok(records) => ApiResult::http_success(
            records
                .into_iter()
                .map(SensitiveAreaFeature::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_sensitive_area(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match area::get_sensitive_area(data.persistence(), path.into_inner()).await {
        Ok(record) => ApiResult::http_success(SensitiveAreaFeature::from(record)),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn sensitive_area_routes() -> Scope {
    web::scope("/sensitive-areas")
        .service(list_sensitive_areas)
        .service(get_sensitive_area)
}
