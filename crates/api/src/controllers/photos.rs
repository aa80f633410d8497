use axum::extract::Path;
use axum::Json;
use routemark_core::attributes::{Middleware, Prefix, Resource};
use routemark_core::ControllerDescriptor;
use routemark_registrar::{register_controller, Controller};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// API resource controller: `photos.index` and `photos.show` under `/api`.
pub struct PhotoController;

impl Controller for PhotoController {
    fn describe() -> ControllerDescriptor {
        ControllerDescriptor::new(super::local_module(module_path!()), "PhotoController")
            .attribute(Prefix::new("api"))
            .attribute(Middleware::new(["no-store"]))
            .attribute(Resource::api("photos").only(["index", "show"]))
    }
}

register_controller!(PhotoController);

#[derive(Debug, Clone, Serialize)]
pub struct Photo {
    pub id: u64,
    pub title: &'static str,
}

const PHOTOS: [Photo; 2] = [
    Photo {
        id: 1,
        title: "Harbour at dawn",
    },
    Photo {
        id: 2,
        title: "Snowy ridge",
    },
];

pub async fn index() -> Json<Vec<Photo>> {
    Json(PHOTOS.to_vec())
}

pub async fn show(Path(photo): Path<u64>) -> ApiResult<Json<Photo>> {
    PHOTOS
        .iter()
        .find(|p| p.id == photo)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Photo {photo}")))
}
