//! Main entry point for the agenda dental backend.
//!
//! Resolves configuration once at startup, selects the persistence backend
//! (in-memory or spreadsheet) and serves the REST API over it.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agenda_core::{
    config, CitaStore, CoreConfig, MemoryStore, SheetsConfig, SheetsStore, StorageBackend,
};
use api_rest::{build_router, AppState};

/// Starts the REST server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `AGENDA_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `AGENDA_BACKEND`: Storage backend, `memory` or `sheets` (default: "memory")
/// - `SHEETS_SPREADSHEET_ID`: Spreadsheet document id (sheets backend)
/// - `SHEETS_SHEET_NAME`: Worksheet name (default: "Citas")
/// - `SHEETS_SHEET_GID`: Numeric worksheet id used for row deletion (default: 0)
/// - `SHEETS_API_TOKEN`: Bearer token for the spreadsheet API (sheets backend)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is incomplete for the selected backend,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agenda_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("AGENDA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let backend = config::backend_from_env_value(std::env::var("AGENDA_BACKEND").ok())?;
    let sheets = match backend {
        StorageBackend::Memory => None,
        StorageBackend::Sheets => Some(SheetsConfig {
            spreadsheet_id: std::env::var("SHEETS_SPREADSHEET_ID").unwrap_or_default(),
            sheet_name: config::sheet_name_from_env_value(std::env::var("SHEETS_SHEET_NAME").ok()),
            sheet_gid: config::sheet_gid_from_env_value(std::env::var("SHEETS_SHEET_GID").ok())?,
            api_token: std::env::var("SHEETS_API_TOKEN").unwrap_or_default(),
        }),
    };
    let cfg = CoreConfig::new(backend, sheets)?;

    let store: Arc<dyn CitaStore> = match cfg.backend() {
        StorageBackend::Memory => {
            tracing::info!("++ Using in-memory store");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Sheets => match cfg.sheets() {
            Some(sheets_cfg) => {
                tracing::info!(
                    "++ Using spreadsheet store (document {})",
                    sheets_cfg.spreadsheet_id
                );
                Arc::new(SheetsStore::new(sheets_cfg)?)
            }
            None => anyhow::bail!("sheets backend selected but configuration is missing"),
        },
    };

    tracing::info!("++ Starting Agenda REST on {}", addr);

    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
