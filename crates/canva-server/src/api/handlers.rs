//! API endpoint handlers

use super::extractors::ToolArguments;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    Json,
};
use canva_client::Tool;
use tracing::{info, warn};

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tools: state.app.list_tools().len(),
    })
}

/// Tool directory
pub(super) async fn list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    let tools = state.app.list_tools();
    Json(ToolListResponse {
        count: tools.len(),
        tools,
    })
}

/// Single tool descriptor
pub(super) async fn get_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Tool>, ServerError> {
    state
        .app
        .tool(&name)
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("tool '{}'", name)))
}

/// Tool invocation endpoint
#[axum::debug_handler]
pub(super) async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ToolArguments(args): ToolArguments,
) -> Result<Json<ToolCallResponse>, ServerError> {
    let arg_count = args.as_object().map(|m| m.len()).unwrap_or(0);
    info!(tool = %name, arg_count, "Received tool call");

    let result = state.app.call_tool(&name, args).await.map_err(|err| {
        warn!(tool = %name, "Tool call failed: {}", err);
        ServerError::from(err)
    })?;

    Ok(Json(ToolCallResponse { tool: name, result }))
}
