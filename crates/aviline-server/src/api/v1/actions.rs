//! Action endpoints: diagnoses and operations
//!
//! Creating a diagnosis or an operation makes it the current record of its
//! kind for its infrastructure. The creation endpoints answer 500 when the
//! current-record protocol rolled back, 404 when the infrastructure is
//! unknown.

use actix_web::{Responder, Scope, delete, get, post, web};

use aviline_common::AvilineError;
use aviline_core::service::action;
use aviline_persistence::model::{ActionKind, ActionRecord};

use crate::api::model::{ActionListParams, CreateDiagnosisRequest, CreateOperationRequest};
use crate::model::{ApiResult, AppState};

/// Fetch one action and check it has the expected kind. A diagnosis id
/// requested through the operation endpoints (or vice versa) reads as
/// missing.
async fn get_of_kind(
    state: &AppState,
    id: i64,
    kind: ActionKind,
) -> Result<ActionRecord, AvilineError> {
    let record = action::get_action(state.persistence(), id).await?;
    if record.kind() != kind {
        return Err(AvilineError::not_found(kind.as_str(), id));
    }
    Ok(record)
}

#[get("")]
pub async fn list_actions(
    data: web::Data<AppState>,
    params: web::Query<ActionListParams>,
) -> impl Responder {
    match action::find_actions(data.persistence(), None, params.infrastructure_id).await {
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_action(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match action::get_action(data.persistence(), path.into_inner()).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/{id}")]
pub async fn delete_action(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match action::delete_action(data.persistence(), path.into_inner()).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn routes() -> Scope {
    web::scope("/actions")
        .service(list_actions)
        .service(get_action)
        .service(delete_action)
}

#[get("")]
pub async fn list_diagnoses(
    data: web::Data<AppState>,
    params: web::Query<ActionListParams>,
) -> impl Responder {
    match action::find_actions(
        data.persistence(),
        Some(ActionKind::Diagnosis),
        params.infrastructure_id,
    )
    .await
    {
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("")]
pub async fn create_diagnosis(
    data: web::Data<AppState>,
    body: web::Json<CreateDiagnosisRequest>,
) -> impl Responder {
    match action::create_action(data.persistence(), &body.into_inner().into_new()).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_diagnosis(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match get_of_kind(&data, path.into_inner(), ActionKind::Diagnosis).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/{id}")]
pub async fn delete_diagnosis(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    if let Err(err) = get_of_kind(&data, id, ActionKind::Diagnosis).await {
        return ApiResult::http_error(err);
    }
    match action::delete_action(data.persistence(), id).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn diagnosis_routes() -> Scope {
    web::scope("/diagnoses")
        .service(list_diagnoses)
        .service(create_diagnosis)
        .service(get_diagnosis)
        .service(delete_diagnosis)
}

#[get("")]
pub async fn list_operations(
    data: web::Data<AppState>,
    params: web::Query<ActionListParams>,
) -> impl Responder {
    match action::find_actions(
        data.persistence(),
        Some(ActionKind::Operation),
        params.infrastructure_id,
    )
    .await
    {
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("")]
pub async fn create_operation(
    data: web::Data<AppState>,
    body: web::Json<CreateOperationRequest>,
) -> impl Responder {
    match action::create_action(data.persistence(), &body.into_inner().into_new()).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_operation(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match get_of_kind(&data, path.into_inner(), ActionKind::Operation).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/{id}")]
pub async fn delete_operation(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    if let Err(err) = get_of_kind(&data, id, ActionKind::Operation).await {
        return ApiResult::http_error(err);
    }
    match action::delete_action(data.persistence(), id).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn operation_routes() -> Scope {
    web::scope("/operations")
        .service(list_operations)
        .service(create_operation)
        .service(get_operation)
        .service(delete_operation)
}
