//! Content endpoints: news, partners and media metadata
//!
//! News items flagged private are only visible to authenticated callers.
//! The presence of an `Authorization` header is what marks a request as
//! authenticated here; validating it is the job of the reverse proxy in
//! front of this service.

use actix_web::{HttpRequest, Responder, Scope, delete, get, http::header, post, put, web};

use aviline_core::service::content;
use aviline_persistence::model::{NewMedia, NewNews, NewPartner};

use crate::api::model::{NewsListParams, NewsSummary};
use crate::model::{ApiResult, AppState};

fn include_private(req: &HttpRequest) -> bool {
    req.headers().contains_key(header::AUTHORIZATION)
}

#[get("")]
pub async fn list_news(
    data: web::Data<AppState>,
    params: web::Query<NewsListParams>,
    req: HttpRequest,
) -> impl Responder {
    match content::find_news(data.persistence(), include_private(&req)).await {
        Ok(records) if params.simple => {
            ApiResult::http_success(records.into_iter().map(NewsSummary::from).collect::<Vec<_>>())
        }
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_news(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> impl Responder {
    match content::get_news(data.persistence(), path.into_inner(), include_private(&req)).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("")]
pub async fn create_news(data: web::Data<AppState>, body: web::Json<NewNews>) -> impl Responder {
    match content::create_news(data.persistence(), &body).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[put("/{id}")]
pub async fn update_news(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<NewNews>,
) -> impl Responder {
    match content::update_news(data.persistence(), path.into_inner(), &body).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/{id}")]
pub async fn delete_news(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match content::delete_news(data.persistence(), path.into_inner()).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn news_routes() -> Scope {
    web::scope("/news")
        .service(list_news)
        .service(get_news)
        .service(create_news)
        .service(update_news)
        .service(delete_news)
}

#[get("")]
pub async fn list_partners(data: web::Data<AppState>) -> impl Responder {
    match content::find_partners(data.persistence()).await {
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_partner(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match content::get_partner(data.persistence(), path.into_inner()).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("")]
pub async fn create_partner(
    data: web::Data<AppState>,
    body: web::Json<NewPartner>,
) -> impl Responder {
    match content::create_partner(data.persistence(), &body).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[put("/{id}")]
pub async fn update_partner(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<NewPartner>,
) -> impl Responder {
    match content::update_partner(data.persistence(), path.into_inner(), &body).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

#[delete("/{id}")]
pub async fn delete_partner(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match content::delete_partner(data.persistence(), path.into_inner()).await {
        Ok(()) => ApiResult::http_success(true),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn partner_routes() -> Scope {
    web::scope("/partners")
        .service(list_partners)
        .service(get_partner)
        .service(create_partner)
        .service(update_partner)
        .service(delete_partner)
}

#[get("")]
pub async fn list_media(data: web::Data<AppState>) -> impl Responder {
    match content::find_media(data.persistence()).await {
        Ok(records) => ApiResult::http_success(records),
        Err(err) => ApiResult::http_error(err),
    }
}

#[get("/{id}")]
pub async fn get_media(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match content::get_media(data.persistence(), path.into_inner()).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

#[post("")]
pub async fn create_media(data: web::Data<AppState>, body: web::Json<NewMedia>) -> impl Responder {
    match content::create_media(data.persistence(), &body).await {
        Ok(record) => ApiResult::http_success(record),
        Err(err) => ApiResult::http_error(err),
    }
}

pub fn media_routes() -> Scope {
    web::scope("/media")
        .service(list_media)
        .service(get_media)
        .service(create_media)
}
