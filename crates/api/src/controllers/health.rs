use axum::Json;
use routemark_core::attributes::Get;
use routemark_core::{ControllerDescriptor, MethodDescriptor, INVOKE_METHOD};
use routemark_registrar::{register_controller, Controller};
use serde::Serialize;

/// Single-action controller answering `GET /health`.
pub struct HealthController;

impl Controller for HealthController {
    fn describe() -> ControllerDescriptor {
        ControllerDescriptor::new(super::local_module(module_path!()), "HealthController").method(
            MethodDescriptor::new(INVOKE_METHOD).attribute(Get::new("health").name("health")),
        )
    }
}

register_controller!(HealthController);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
