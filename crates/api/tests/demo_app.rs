//! Integration tests for the demo application and its middleware stack.

mod common;

use std::fs;

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, build_test_app, demo_table, get, send};
use routemark_api::controllers;
use routemark_registrar::{RegistrarConfig, RegistrarError};

fn with_api_key(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header("x-api-key", "secret")
        .body(Body::empty())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Route table
// ---------------------------------------------------------------------------

#[test]
fn demo_routes_are_registered() {
    let table = demo_table();

    assert_eq!(table.by_name("health").unwrap().uri, "health");
    assert_eq!(table.by_name("users.show").unwrap().uri, "api/users/{user}");
    assert_eq!(table.by_name("photos.index").unwrap().uri, "api/photos");
    assert!(table.by_name("photos.store").is_none());
    assert_eq!(table.fallbacks().count(), 1);
}

#[test]
fn disabled_registration_yields_an_empty_table() {
    let config = RegistrarConfig::from_vars([("ROUTE_ATTRIBUTES_ENABLED", "false")]).unwrap();

    let table = routemark_api::register_routes(&config, &controllers::catalog()).unwrap();

    assert!(table.is_empty());
}

#[test]
fn configured_directories_register_only_scanned_controllers() {
    let dir = tempfile::tempdir().unwrap();
    let sources = dir.path().join("controllers");
    fs::create_dir(&sources).unwrap();
    for file in ["mod.rs", "users.rs", "photos.rs"] {
        fs::write(sources.join(file), "").unwrap();
    }
    let config = RegistrarConfig::from_vars([
        (
            "ROUTE_ATTRIBUTES_DIRECTORIES",
            sources.to_string_lossy().into_owned(),
        ),
        (
            "ROUTE_ATTRIBUTES_BASE_PATH",
            dir.path().to_string_lossy().into_owned(),
        ),
    ])
    .unwrap();

    let table = routemark_api::register_routes(&config, &controllers::catalog()).unwrap();

    assert_eq!(table.by_name("users.show").unwrap().uri, "api/users/{user}");
    assert_eq!(table.by_name("photos.index").unwrap().uri, "api/photos");
    assert!(table.by_name("health").is_none());
    assert_eq!(table.fallbacks().count(), 0);
}

#[test]
fn missing_configured_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let config = RegistrarConfig::from_vars([(
        "ROUTE_ATTRIBUTES_DIRECTORIES",
        missing.to_string_lossy().into_owned(),
    )])
    .unwrap();

    let result = routemark_api::register_routes(&config, &controllers::catalog());

    assert_matches!(result, Err(RegistrarError::NotADirectory(path)) if path == missing);
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let response = get(build_test_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().get("x-request-id").is_some(),
        "Response must contain an x-request-id header"
    );

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Users: class middleware, constraints, defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn users_require_api_key() {
    let response = get(build_test_app(), "/api/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn users_index_lists_users() {
    let response = send(build_test_app(), with_api_key("/api/users")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn users_show_uses_route_defaults() {
    let response = send(build_test_app(), with_api_key("/api/users/1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["format"], "json");
}

#[tokio::test]
async fn users_show_rejects_non_numeric_id() {
    let response = send(build_test_app(), with_api_key("/api/users/ada")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_show_unknown_user_is_not_found() {
    let response = send(build_test_app(), with_api_key("/api/users/99")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "User 99 not found");
}

// ---------------------------------------------------------------------------
// Photos: API resource
// ---------------------------------------------------------------------------

#[tokio::test]
async fn photos_are_not_cached() {
    let response = get(build_test_app(), "/api/photos").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "no-store");
}

#[tokio::test]
async fn photos_show_returns_one_photo() {
    let response = get(build_test_app(), "/api/photos/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], 2);
}

#[tokio::test]
async fn photos_store_is_not_routed() {
    let request = Request::post("/api/photos").body(Body::empty()).unwrap();
    let response = send(build_test_app(), request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_hits_fallback() {
    let response = get(build_test_app(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /this-route-does-not-exist");
}
