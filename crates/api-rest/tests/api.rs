//! Integration tests for the REST router, driven in-process via tower's
//! `oneshot` against the in-memory backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use agenda_core::{CitaInput, CitaStore, MemoryStore};
use api_rest::{build_router, AppState};

fn app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = build_router(AppState::new(store.clone()));
    (app, store)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn create_returns_generated_id_and_list_contains_the_record() {
    let (app, _store) = app_with_store();

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/api/citas",
        Some(json!({"nombre": "Ana", "fecha": "2024-02-01", "hora": "09:00"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Cita creada correctamente"));
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(body["data"]["estado"], json!("Pendiente"));

    let (status, body) = send(app, Method::GET, "/api/citas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["data"][0]["id"], json!(id));
    assert_eq!(body["data"][0]["nombre"], json!("Ana"));
    assert_eq!(body["data"][0]["fecha"], json!("2024-02-01"));
    assert_eq!(body["data"][0]["hora"], json!("09:00"));
}

#[tokio::test]
async fn create_without_required_fields_is_rejected() {
    let (app, store) = app_with_store();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/citas",
        Some(json!({"nombre": "Ana"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("fecha"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_of_estado_only_preserves_every_other_field() {
    let (app, store) = app_with_store();

    let cita = store
        .insert(CitaInput {
            id: Some("10".into()),
            nombre: Some("Ana".into()),
            apellidos: Some("López".into()),
            telefono: Some("+34 600 000 001".into()),
            fecha: Some("2024-02-01".into()),
            hora: Some("09:00".into()),
            tratamiento: Some("Empaste".into()),
            doctor: Some("Dr. García".into()),
            notas: Some("Sin alergias".into()),
            ..CitaInput::default()
        })
        .await
        .unwrap();

    let (status, body) = send(
        app,
        Method::PUT,
        "/api/citas/10",
        Some(json!({"estado": "Confirmada"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Cita actualizada correctamente"));
    assert_eq!(body["data"]["estado"], json!("Confirmada"));

    let citas = store.list().await.unwrap();
    assert_eq!(citas.len(), 1);
    assert_eq!(citas[0].estado, "Confirmada");
    assert_eq!(citas[0].nombre, cita.nombre);
    assert_eq!(citas[0].apellidos, cita.apellidos);
    assert_eq!(citas[0].telefono, cita.telefono);
    assert_eq!(citas[0].tratamiento, cita.tratamiento);
    assert_eq!(citas[0].notas, cita.notas);
    assert_eq!(citas[0].created_at, cita.created_at);
}

#[tokio::test]
async fn update_of_unknown_id_returns_the_404_envelope() {
    let (app, _store) = app_with_store();

    let (status, body) = send(
        app,
        Method::PUT,
        "/api/citas/999",
        Some(json!({"estado": "Confirmada"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Cita no encontrada"}));
}

#[tokio::test]
async fn delete_removes_the_record_and_shrinks_the_listing() {
    let (app, store) = app_with_store();
    store
        .insert(CitaInput {
            id: Some("10".into()),
            nombre: Some("Ana".into()),
            fecha: Some("2024-02-01".into()),
            hora: Some("09:00".into()),
            ..CitaInput::default()
        })
        .await
        .unwrap();

    let (status, body) = send(app.clone(), Method::DELETE, "/api/citas/10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Cita eliminada correctamente"})
    );

    let (_, body) = send(app, Method::GET, "/api/citas", None).await;
    assert_eq!(body["total"], json!(0));
}

#[tokio::test]
async fn delete_of_unknown_id_returns_the_404_envelope() {
    let (app, _store) = app_with_store();

    let (status, body) = send(app, Method::DELETE, "/api/citas/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Cita no encontrada"}));
}

#[tokio::test]
async fn health_reports_status_and_record_count() {
    let (app, store) = app_with_store();
    for id in ["1", "2"] {
        store
            .insert(CitaInput {
                id: Some(id.into()),
                nombre: Some("Ana".into()),
                fecha: Some("2024-02-01".into()),
                hora: Some("09:00".into()),
                ..CitaInput::default()
            })
            .await
            .unwrap();
    }

    let (status, body) = send(app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["message"], json!("Backend funcionando correctamente"));
    assert_eq!(body["totalCitas"], json!(2));
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn index_returns_the_service_banner() {
    let (app, _store) = app_with_store();

    let (status, body) = send(app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("API Agenda Dental"));
    assert_eq!(body["endpoints"]["health"], json!("/api/health"));
    assert_eq!(body["endpoints"]["citas"], json!("/api/citas"));
}
