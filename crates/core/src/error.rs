/// Errors raised while turning declarative route metadata into values.
///
/// These only surface from attribute instantiation; the registrar treats
/// them as "skip this attribute" rather than aborting a controller.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Route `{uri}` declares no HTTP methods")]
    EmptyMethods { uri: String },

    #[error("Invalid attribute argument: {0}")]
    InvalidArgument(String),
}
