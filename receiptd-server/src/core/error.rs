use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-level errors
///
/// The caller only ever sees a status code; error detail stays in the server
/// log.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The device failed its one-shot open; every job fails until restart
    #[error("printer device not ready")]
    DeviceNotReady,

    /// The request body is not a valid print document
    #[error("malformed document: {0}")]
    Document(#[from] serde_json::Error),

    /// The driver rejected the job (bad session config, device write failure)
    #[error("print failed: {0}")]
    Print(#[from] receiptd_printer::PrintError),

    /// Anything else
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::DeviceNotReady => {
                tracing::warn!("Rejecting job: printer device not ready");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Document(err) => {
                tracing::error!(error = %err, "Malformed print document");
                StatusCode::BAD_REQUEST
            }
            ServerError::Print(err) => {
                tracing::error!(error = %err, "Print job failed");
                StatusCode::BAD_REQUEST
            }
            ServerError::Internal(err) => {
                tracing::error!(error = ?err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status.into_response()
    }
}

/// Result alias for handlers
pub type Result<T> = std::result::Result<T, ServerError>;
