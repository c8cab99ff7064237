//! POST /chat - keyword-routed chat commands.

use std::sync::Arc;

use axum::{extract::State, Json};
use bytes::Bytes;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{ChatResponse, Envelope};
use crate::router::{dispatch, route};

pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = Envelope::parse(&body)?.required("message")?;
    let command = route(&message);
    tracing::debug!(command = ?command, "Routed chat message");

    let response = dispatch(command, state.llm.as_ref(), state.github.as_ref()).await?;
    Ok(Json(ChatResponse { response }))
}
