//! Nomenclature endpoints: classification terms

use actix_web::{Responder, Scope, get, web};

use aviline_core::service::nomenclature;

use crate::api::model::NomenclatureListParams;
use crate::model::{ApiResult, AppState};

#[get("")]
pub async fn list_nomenclatures(
    data: web::Data<AppState>,
    params: web::Query<NomenclatureListParams>,
) -> impl Responder {
    match nomenclature::find_nomenclatures(data.persistence(), params.mnemonic.as_deref()).await {
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_nomenclature(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match nomenclature::get_nomenclature(data.persistence(), path.into_inner()).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn routes() -> Scope {
    web::scope("/nomenclatures")
        .service(list_nomenclatures)
        .service(get_nomenclature)
}
