//! # API REST
//!
//! REST API implementation for the agenda dental backend.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - JSON success/error envelopes with the `success` discriminator
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (serialization, CORS)
//!
//! Store access goes through the injected [`agenda_core::CitaStore`] trait
//! object, so the same router serves the in-memory and the spreadsheet
//! backends unchanged.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use agenda_core::{validation, Cita, CitaError, CitaInput, CitaStore};

/// Application state shared across REST API handlers.
///
/// Holds the store trait object every handler operates on; the concrete
/// backend is chosen at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn CitaStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CitaStore>) -> Self {
        Self { store }
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    #[serde(rename = "totalCitas")]
    pub total_citas: usize,
}

/// Response for the cita listing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListCitasRes {
    pub success: bool,
    pub data: Vec<Cita>,
    pub total: usize,
}

/// Response for the create/update/delete endpoints.
///
/// `data` carries the affected record where the backend returns one (create
/// always does; update only on the in-memory backend) and is omitted from the
/// JSON otherwise.
#[derive(Debug, Serialize, ToSchema)]
pub struct CitaRes {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Cita>,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub error: String,
}

/// Service banner returned by the root route.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexRes {
    pub message: String,
    pub version: String,
    pub endpoints: IndexEndpoints,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexEndpoints {
    pub health: String,
    pub citas: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(index, health, list_citas, create_cita, update_cita, delete_cita),
    components(schemas(
        Cita,
        CitaInput,
        HealthRes,
        ListCitasRes,
        CitaRes,
        ErrorRes,
        IndexRes,
        IndexEndpoints
    ))
)]
struct ApiDoc;

/// Builds the REST router over the given state.
///
/// Mounts the cita CRUD routes, the health and index routes, the Swagger UI
/// and a permissive CORS layer. Exposed publicly so binaries can serve it and
/// integration tests can drive it without a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/citas", get(list_citas))
        .route("/api/citas", post(create_cita))
        .route("/api/citas/:id", put(update_cita))
        .route("/api/citas/:id", delete(delete_cita))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Maps a store failure to its HTTP status and JSON error envelope.
///
/// A lookup miss is 404, rejected input is 400 and everything else (backend
/// I/O, auth, malformed ranges) is a 500 carrying the underlying message. No
/// failure is fatal to the process; each request fails independently.
fn error_reply(context: &'static str, err: CitaError) -> (StatusCode, Json<ErrorRes>) {
    let status = match err {
        CitaError::NotFound => StatusCode::NOT_FOUND,
        CitaError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{} error: {:?}", context, err);
    }

    (
        status,
        Json(ErrorRes {
            success: false,
            error: err.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner with endpoint map", body = IndexRes)
    )
)]
/// Root route: service name, version and endpoint map.
#[axum::debug_handler]
async fn index() -> Json<IndexRes> {
    Json(IndexRes {
        message: "API Agenda Dental".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints: IndexEndpoints {
            health: "/api/health".into(),
            citas: "/api/citas".into(),
        },
    })
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes),
        (status = 500, description = "Store unreachable", body = ErrorRes)
    )
)]
/// Health check endpoint.
///
/// Reports process status and the current record count, so it also proves the
/// backing store is reachable. Used for monitoring and load balancer checks.
#[axum::debug_handler]
async fn health(
    State(state): State<AppState>,
) -> Result<Json<HealthRes>, (StatusCode, Json<ErrorRes>)> {
    match state.store.list().await {
        Ok(citas) => Ok(Json(HealthRes {
            status: "ok".into(),
            message: "Backend funcionando correctamente".into(),
            timestamp: Utc::now().to_rfc3339(),
            total_citas: citas.len(),
        })),
        Err(e) => Err(error_reply("Health", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/citas",
    responses(
        (status = 200, description = "All citas in store order", body = ListCitasRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// List all citas.
///
/// Returns every record in the backend's native order; no filtering, sorting
/// or pagination.
#[axum::debug_handler]
async fn list_citas(
    State(state): State<AppState>,
) -> Result<Json<ListCitasRes>, (StatusCode, Json<ErrorRes>)> {
    match state.store.list().await {
        Ok(citas) => {
            let total = citas.len();
            Ok(Json(ListCitasRes {
                success: true,
                data: citas,
                total,
            }))
        }
        Err(e) => Err(error_reply("List citas", e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/citas",
    request_body = CitaInput,
    responses(
        (status = 200, description = "Cita created", body = CitaRes),
        (status = 400, description = "Missing or oversized fields", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// Create a new cita.
///
/// The body is a partial record; `nombre`, `fecha` and `hora` are required.
/// An absent identifier is generated and absent optional fields receive
/// defaults. Returns the record as stored.
#[axum::debug_handler]
async fn create_cita(
    State(state): State<AppState>,
    Json(input): Json<CitaInput>,
) -> Result<Json<CitaRes>, (StatusCode, Json<ErrorRes>)> {
    if let Err(e) = validation::validate_nueva_cita(&input) {
        return Err(error_reply("Create cita", e));
    }

    match state.store.insert(input).await {
        Ok(cita) => Ok(Json(CitaRes {
            success: true,
            message: "Cita creada correctamente".into(),
            data: Some(cita),
        })),
        Err(e) => Err(error_reply("Create cita", e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/citas/{id}",
    request_body = CitaInput,
    params(
        ("id" = String, Path, description = "Identifier of the cita to update")
    ),
    responses(
        (status = 200, description = "Cita updated", body = CitaRes),
        (status = 400, description = "Oversized fields", body = ErrorRes),
        (status = 404, description = "Unknown identifier", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// Update the cita addressed by `id`.
///
/// Partial patches are legal; how absent fields are treated depends on the
/// backend (the in-memory store preserves them, the spreadsheet store reverts
/// them to defaults). The identifier itself never changes.
#[axum::debug_handler]
async fn update_cita(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(patch): Json<CitaInput>,
) -> Result<Json<CitaRes>, (StatusCode, Json<ErrorRes>)> {
    if let Err(e) = validation::validate_longitudes(&patch) {
        return Err(error_reply("Update cita", e));
    }

    match state.store.replace_by_id(&id, patch).await {
        Ok(data) => Ok(Json(CitaRes {
            success: true,
            message: "Cita actualizada correctamente".into(),
            data,
        })),
        Err(e) => Err(error_reply("Update cita", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/citas/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the cita to delete")
    ),
    responses(
        (status = 200, description = "Cita deleted", body = CitaRes),
        (status = 404, description = "Unknown identifier", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// Delete the cita addressed by `id`.
///
/// Removal is permanent; there is no soft-delete or tombstone.
#[axum::debug_handler]
async fn delete_cita(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<CitaRes>, (StatusCode, Json<ErrorRes>)> {
    match state.store.delete_by_id(&id).await {
        Ok(()) => Ok(Json(CitaRes {
            success: true,
            message: "Cita eliminada correctamente".into(),
            data: None,
        })),
        Err(e) => Err(error_reply("Delete cita", e)),
    }
}
