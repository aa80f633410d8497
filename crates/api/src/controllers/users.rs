use axum::extract::Path;
use axum::{Extension, Json};
use routemark_core::attributes::{Defaults, Get, Middleware, Prefix, WhereNumber};
use routemark_core::{ControllerDescriptor, MethodDescriptor};
use routemark_registrar::{register_controller, Controller};
use serde::Serialize;

use crate::binding::RouteDefaults;
use crate::error::{ApiError, ApiResult};

/// Read-only user listing under `/api/users`, guarded by `api-key`.
pub struct UserController;

impl Controller for UserController {
    fn describe() -> ControllerDescriptor {
        ControllerDescriptor::new(super::local_module(module_path!()), "UserController")
            .attribute(Prefix::new("api"))
            .attribute(Middleware::new(["api-key"]))
            .attribute(Defaults::new("format", "json"))
            .method(
                MethodDescriptor::new("index").attribute(Get::new("users").name("users.index")),
            )
            .method(
                MethodDescriptor::new("show")
                    .attribute(Get::new("users/{user}").name("users.show"))
                    .attribute(WhereNumber::new("user")),
            )
    }
}

register_controller!(UserController);

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: &'static str,
}

const USERS: [User; 2] = [
    User { id: 1, name: "Ada" },
    User { id: 2, name: "Grace" },
];

#[derive(Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    user: User,
    format: String,
}

pub async fn index() -> Json<Vec<User>> {
    Json(USERS.to_vec())
}

pub async fn show(
    Path(id): Path<u64>,
    Extension(defaults): Extension<RouteDefaults>,
) -> ApiResult<Json<UserResponse>> {
    let user = USERS
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("User {id}")))?;

    Ok(Json(UserResponse {
        user,
        format: defaults.get("format").unwrap_or("html").to_string(),
    }))
}
