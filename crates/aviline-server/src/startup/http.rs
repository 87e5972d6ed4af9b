//! HTTP server setup

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware, web};

use crate::api;
use crate::model::AppState;

/// Creates and binds the API HTTP server.
pub fn api_server(
    app_state: Arc<AppState>,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(web::Data::from(app_state.clone()))
            .service(api::v1::route::routes())
    })
    .bind((address, port))?
    .run())
}
