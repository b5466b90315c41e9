use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the workbook record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The workbook file could not be read from or written to disk.
    #[error("workbook {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook bytes could not be parsed as an xlsx file.
    #[error("malformed workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// Serializing the workbook back to xlsx failed.
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// A sheet the application depends on is not present in the workbook.
    #[error("workbook has no sheet named `{0}`")]
    Schema(String),

    /// A key could not be derived because the table holds no keyed rows.
    #[error("table `{0}` has no rows to derive a new key from")]
    EmptyTable(String),

    /// User input could not be coerced to the expected type.
    #[error("{0}")]
    Validation(String),
}

/// Invalid runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("session secret must be at least {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },
}

#[cfg(feature = "web")]
pub use web::AppError;

#[cfg(feature = "web")]
mod web {
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use thiserror::Error;

    use super::StoreError;

    /// Error type returned by request handlers.
    #[derive(Debug, Error)]
    pub enum AppError {
        #[error(transparent)]
        Store(#[from] StoreError),

        #[error("template error: {0}")]
        Render(#[from] handlebars::RenderError),

        #[error("background task failed: {0}")]
        Join(#[from] tokio::task::JoinError),

        #[error("{0}")]
        NotFound(String),
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            match self {
                AppError::Store(StoreError::Validation(message)) => {
                    (StatusCode::BAD_REQUEST, message).into_response()
                }
                AppError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
                other => {
                    log::error!("request failed: {}", other);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
                }
            }
        }
    }
}
