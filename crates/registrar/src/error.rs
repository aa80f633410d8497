use std::path::PathBuf;

/// Errors surfaced by the registrar.
///
/// Only scanning problems are fatal. Unknown controllers and malformed
/// route attributes are skipped and logged instead.
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Convenience alias for registrar results.
pub type RegistrarResult<T> = Result<T, RegistrarError>;
