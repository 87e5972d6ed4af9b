//! Main entry point for the Aviline API server.
//!
//! Loads configuration, wires the storage backend and starts the HTTP server.

use std::sync::Arc;

use aviline_persistence::model::StorageMode;
use aviline_persistence::traits::PersistenceService;
use aviline_persistence::{MemoryPersistService, SqlPersistService};
use aviline_server::{
    model::{AppState, Configuration},
    startup,
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new();
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let storage_mode = configuration.storage_mode();
    info!("Persistence mode: {}", storage_mode);

    let persistence: Arc<dyn PersistenceService> = match storage_mode {
        StorageMode::ExternalDb => {
            let db = configuration.database_connection().await?;
            Arc::new(SqlPersistService::new(db))
        }
        StorageMode::Memory => {
            info!("Using in-memory storage, data will not survive a restart");
            Arc::new(MemoryPersistService::new())
        }
    };

    let address = configuration.server_address();
    let port = configuration.server_port();

    let app_state = Arc::new(AppState {
        configuration,
        persistence,
    });

    info!("Starting Aviline API server on {}:{}", address, port);
    let server = startup::api_server(app_state, address, port)?;

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Server shutting down gracefully");
        }
    }

    info!("Aviline server shutdown complete");
    Ok(())
}
