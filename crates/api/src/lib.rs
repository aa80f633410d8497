//! Routemark demo server library.
//!
//! Exposes the axum binding, configuration, error handling and the demo
//! controllers so integration tests and the binary entrypoint can both
//! build the same application.

pub mod binding;
pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;

use std::time::Duration;

use axum::http::{HeaderName, StatusCode};
use axum::Router;
use routemark_registrar::{
    ControllerCatalog, RegistrarConfig, RegistrarResult, RouteRegistrar, RouteTable,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use binding::{AxumBinding, RouteDefaults};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

/// Register the routes of `catalog` as `config` describes.
///
/// Scans the configured directories when there are any, otherwise
/// registers the whole catalog. Nothing is registered when disabled.
pub fn register_routes(
    config: &RegistrarConfig,
    catalog: &ControllerCatalog,
) -> RegistrarResult<RouteTable> {
    let mut table = RouteTable::new();
    if !config.enabled {
        tracing::info!("Attribute route registration disabled");
        return Ok(table);
    }

    let mut registrar = RouteRegistrar::with_config(&mut table, catalog, config);
    if config.directories.is_empty() {
        registrar.register_catalog();
    } else {
        registrar.register_directory(&config.directories)?;
    }

    tracing::info!(routes = table.len(), "Registered attribute routes");
    Ok(table)
}

/// Build the application router for `table` with the full middleware stack.
pub fn build_app(
    binding: &AxumBinding,
    table: &RouteTable,
    config: &ServerConfig,
) -> Result<Router, ApiError> {
    let request_id_header = HeaderName::from_static("x-request-id");

    let app = binding
        .build(table)?
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid));

    Ok(app)
}
