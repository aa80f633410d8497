use axum::http::{StatusCode, Uri};
use axum::Json;
use routemark_core::attributes::{Fallback, Get};
use routemark_core::{ControllerDescriptor, MethodDescriptor};
use routemark_registrar::{register_controller, Controller};
use serde_json::{json, Value};

/// Answers every GET request no other route matched.
pub struct FallbackController;

impl Controller for FallbackController {
    fn describe() -> ControllerDescriptor {
        ControllerDescriptor::new(super::local_module(module_path!()), "FallbackController").method(
            MethodDescriptor::new("missing")
                .attribute(Get::new("{*path}"))
                .attribute(Fallback),
        )
    }
}

register_controller!(FallbackController);

pub async fn missing(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("No route for {}", uri.path()),
            "code": "NOT_FOUND",
        })),
    )
}
