//! Pull-mode read and producer write endpoints.

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;
use crate::server::state::AppState;
use crate::store::WriteMode;

/// Body of `POST /text`.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
    /// `None` only when the field is absent; an explicit `null` is `Some`.
    #[serde(default, deserialize_with = "present")]
    pub mode: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub status: &'static str,
    /// Length of the submitted chunk, not of the resulting text.
    pub length: usize,
}

/// GET /text - Current text.
pub async fn get_text(State(state): State<Arc<AppState>>) -> Json<TextResponse> {
    Json(TextResponse {
        text: state.relay.current(),
    })
}

/// POST /text - Replace or extend the current text.
///
/// The body is parsed by hand so that any malformed or incomplete request
/// gets the same 400 response.
pub async fn post_text(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WriteResponse>, ApiError> {
    let request: TextRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed text request");
        ApiError::MissingText
    })?;
    let text = request.text.ok_or(ApiError::MissingText)?;
    let mode = WriteMode::from_request(request.mode.as_ref());

    let length = state.relay.write(mode, &text);

    Ok(Json(WriteResponse {
        status: "success",
        length,
    }))
}
