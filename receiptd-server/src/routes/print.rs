//! Print route
//!
//! `POST /print` accepts one JSON print document and blocks until the job is
//! flushed to the device. The caller only ever sees a status code: 200 on
//! success, 503 while the device is not ready, 400 for anything wrong with
//! the document or the print itself (detail goes to the server log).

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use receiptd_printer::EscPosSession;

use crate::core::{ServerError, ServerState};
use crate::document::Document;
use crate::interpreter;

/// Build the print router
pub fn router() -> Router<ServerState> {
    Router::new().route("/print", post(print_document))
}

/// Execute one print job
pub async fn print_document(
    State(state): State<ServerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, ServerError> {
    // One-shot readiness latch: if the device never opened, fail fast
    if !state.await_ready().await {
        return Err(ServerError::DeviceNotReady);
    }

    let document: Document = serde_json::from_value(body)?;

    // One job on the wire at a time
    let _guard = state.print_lock().lock().await;

    let mut session =
        EscPosSession::new(state.device(), &document.encoding, document.paper_width)?;
    interpreter::run(&document, &mut session).await?;

    tracing::info!(
        commands = document.commands.len(),
        encoding = %document.encoding,
        "Print job completed"
    );

    Ok(StatusCode::OK)
}
