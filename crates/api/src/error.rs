use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use routemark_core::{Action, HttpMethod};
use routemark_registrar::{ConfigError, RegistrarError};
use serde_json::json;

/// Errors raised while binding a route table to axum, booting the server,
/// or serving a demo request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No handler registered for action `{0}`")]
    MissingHandler(Action),

    #[error("Unknown middleware `{name}` on route `{uri}`")]
    UnknownMiddleware { name: String, uri: String },

    #[error("Invalid constraint for `{param}` on route `{uri}`: {source}")]
    InvalidConstraint {
        param: String,
        uri: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid domain pattern `{domain}`: {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid route path `{uri}`: {reason}")]
    InvalidPath { uri: String, reason: &'static str },

    #[error("Route {method} `{uri}` is registered more than once")]
    Conflict { method: HttpMethod, uri: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A demo handler could not find the requested record.
    #[error("{0} not found")]
    NotFound(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{what} not found"),
            ),
            other => {
                tracing::error!(error = %other, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn config_errors_surface_as_api_errors() {
        let error: ApiError = ConfigError::Invalid {
            var: "ROUTE_ATTRIBUTES_ENABLED",
            expected: "a boolean",
            value: "maybe".to_string(),
        }
        .into();

        assert_matches!(
            &error,
            ApiError::Config(ConfigError::Invalid { var, .. }) if *var == "ROUTE_ATTRIBUTES_ENABLED"
        );
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_records_are_not_found() {
        let response = ApiError::NotFound("User 9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
