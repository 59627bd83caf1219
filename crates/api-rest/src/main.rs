//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, always against the in-memory backend
//! and seeded with two demo citas.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you want a
//! self-contained server with content (plus OpenAPI/Swagger UI) and no
//! spreadsheet credentials. The workspace's main `agenda-run` binary selects
//! the backend from configuration.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agenda_core::{Cita, MemoryStore};
use api_rest::{build_router, AppState};

/// Demo records matching a fresh install of the original service.
fn demo_citas() -> Vec<Cita> {
    vec![
        Cita {
            id: "1".into(),
            nombre: "María".into(),
            apellidos: "González".into(),
            telefono: "+34 600 123 456".into(),
            email: String::new(),
            fecha: "2024-01-15".into(),
            hora: "10:00".into(),
            tratamiento: "Limpieza".into(),
            doctor: "Dr. García".into(),
            estado: "Confirmada".into(),
            duracion: "30".into(),
            notas: "Primera visita".into(),
            created_at: "2024-01-10T10:00:00Z".into(),
        },
        Cita {
            id: "2".into(),
            nombre: "Juan".into(),
            apellidos: "Pérez".into(),
            telefono: "+34 600 789 012".into(),
            email: String::new(),
            fecha: "2024-01-16".into(),
            hora: "14:30".into(),
            tratamiento: "Revisión".into(),
            doctor: "Dra. Martínez".into(),
            estado: "Pendiente".into(),
            duracion: "30".into(),
            notas: String::new(),
            created_at: "2024-01-10T11:00:00Z".into(),
        },
    ]
}

/// Main entry point for the standalone REST API server.
///
/// Starts the REST server on the configured address (default: 0.0.0.0:3000)
/// with a seeded in-memory store.
///
/// # Environment Variables
/// - `AGENDA_REST_ADDR`: Server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("AGENDA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let seed = demo_citas();
    tracing::info!("-- Starting Agenda REST API on {} ({} citas)", addr, seed.len());

    let state = AppState::new(Arc::new(MemoryStore::with_citas(seed)));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
