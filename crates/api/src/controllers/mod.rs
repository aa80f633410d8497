//! Demo controllers and the handlers their routes dispatch to.
//!
//! Each controller describes its routes with attributes and submits itself
//! to the link-time catalog; [`binding`] maps the resulting actions to the
//! axum handlers below.

pub mod fallback;
pub mod health;
pub mod photos;
pub mod users;

use routemark_registrar::{Controller, ControllerCatalog};

use crate::binding::AxumBinding;
use crate::middleware;

use fallback::FallbackController;
use health::HealthController;
use photos::PhotoController;
use users::UserController;

/// Rewrite a `module_path!()` so it starts with `crate`, the namespace a
/// directory scan of this crate's sources produces.
pub fn local_module(module_path: &str) -> String {
    match module_path.split_once("::") {
        Some((krate, rest)) if krate == env!("CARGO_CRATE_NAME") => format!("crate::{rest}"),
        None if module_path == env!("CARGO_CRATE_NAME") => "crate".to_string(),
        _ => module_path.to_string(),
    }
}

/// The demo controllers, without relying on link-time discovery.
pub fn catalog() -> ControllerCatalog {
    ControllerCatalog::new()
        .with::<FallbackController>()
        .with::<HealthController>()
        .with::<PhotoController>()
        .with::<UserController>()
}

/// Handlers and middleware for every demo route.
pub fn binding() -> AxumBinding {
    let health_controller = HealthController::describe().name;
    let user_controller = UserController::describe().name;
    let photo_controller = PhotoController::describe().name;
    let fallback_controller = FallbackController::describe().name;

    middleware::register(AxumBinding::new())
        .invokable(&health_controller, health::health_check)
        .method(&user_controller, "index", users::index)
        .method(&user_controller, "show", users::show)
        .method(&photo_controller, "index", photos::index)
        .method(&photo_controller, "show", photos::show)
        .method(&fallback_controller, "missing", fallback::missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_module_uses_crate_root() {
        assert_eq!(
            local_module("routemark_api::controllers::users"),
            "crate::controllers::users"
        );
        assert_eq!(local_module("routemark_api"), "crate");
        assert_eq!(local_module("other::controllers"), "other::controllers");
    }

    #[test]
    fn catalog_contains_every_demo_controller() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog
            .get("crate::controllers::users::UserController")
            .is_some());
        assert_eq!(catalog.in_module("crate::controllers::health").count(), 1);
    }
}
