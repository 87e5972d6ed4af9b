//! Infrastructure endpoints: poles and line segments
//!
//! Creation runs the area auto-attacher, so a freshly created feature already
//! carries the ids of every administrative area and sensitivity zone its
//! geometry intersects.

use actix_web::{Responder, Scope, delete, get, post, web};

use aviline_common::AvilineError;
use aviline_core::service::infrastructure;
use aviline_persistence::model::{InfrastructureKind, InfrastructureRecord};

use crate::api::model::{CreateLineRequest, CreatePointRequest, InfrastructureFeature};
use crate::model::{ApiResult, AppState};

fn features(records: Vec<InfrastructureRecord>) -> Vec<InfrastructureFeature> {
    records.into_iter().map(InfrastructureFeature::from).collect()
}

/// Fetch one infrastructure and check it has the expected variant. A pole id
/// requested through the line endpoints (or vice versa) reads as missing.
async fn get_of_kind(
    state: &AppState,
    id: i64,
    kind: InfrastructureKind,
) -> Result<InfrastructureRecord, AvilineError> {
    let record = infrastructure::get_infrastructure(state.persistence(), id).await?;
    if record.kind != kind {
        return Err(AvilineError::not_found(kind.as_str(), id));
    }
    Ok(record)
}

#[get("/infrastructures")]
pub async fn list_infrastructures(data: web::Data<AppState>) -> impl Responder {
    match infrastructure::find_infrastructures(data.persistence(), None).await {
        Ok(records) => ApiResult::http_success(features(records)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/points")]
pub async fn list_points(data: web::Data<AppState>) -> impl Responder {
    match infrastructure::find_infrastructures(data.persistence(), Some(InfrastructureKind::Point))
        .await
    {
        Ok(records) => ApiResult::http_success(features(records)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("/points")]
pub async fn create_point(
    data: web::Data<AppState>,
    body: web::Json<CreatePointRequest>,
) -> impl Responder {
    match infrastructure::create_infrastructure(data.persistence(), &body.into_inner().into_new())
        .await
    {
        Ok(record) => ApiResult::http_success(InfrastructureFeature::from(record)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/points/{id}")]
pub async fn get_point(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match get_of_kind(&data, path.into_inner(), InfrastructureKind::Point).await {
        Ok(record) => ApiResult::http_success(InfrastructureFeature::from(record)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/points/{id}")]
pub async fn delete_point(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    if let Err(err) = get_of_kind(&data, id, InfrastructureKind::Point).await {
        return ApiResult::http_error(err);
    }
    match infrastructure::delete_infrastructure(data.persistence(), id).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/lines")]
pub async fn list_lines(data: web::Data<AppState>) -> impl Responder {
    match infrastructure::find_infrastructures(data.persistence(), Some(InfrastructureKind::Line))
        .await
    {
        Ok(records) => ApiResult::http_success(features(records)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("/lines")]
pub async fn create_line(
    data: web::Data<AppState>,
    body: web::Json<CreateLineRequest>,
) -> impl Responder {
    match infrastructure::create_infrastructure(data.persistence(), &body.into_inner().into_new())
        .await
    {
        Ok(record) => ApiResult::http_success(InfrastructureFeature::from(record)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/lines/{id}")]
pub async fn get_line(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match get_of_kind(&data, path.into_inner(), InfrastructureKind::Line).await {
        Ok(record) => ApiResult::http_success(InfrastructureFeature::from(record)),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/lines/{id}")]
pub async fn delete_line(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    if let Err(err) = get_of_kind(&data, id, InfrastructureKind::Line).await {
        return ApiResult::http_error(err);
    }
    match infrastructure::delete_infrastructure(data.persistence(), id).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn routes() -> Scope {
    web::scope("/cables")
        .service(list_infrastructures)
        .service(list_points)
        .service(create_point)
        .service(get_point)
        .service(delete_point)
        .service(list_lines)
        .service(create_line)
        .service(get_line)
        .service(delete_line)
}
