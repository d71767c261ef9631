//! REST API type definitions

use canva_client::{CanvaApp, Tool};
use serde::Serialize;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<CanvaApp>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of registered tools
    pub tools: usize,
}

/// Tool directory response
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub count: usize,
    pub tools: Vec<Tool>,
}

/// Tool invocation response
#[derive(Debug, Serialize)]
pub struct ToolCallResponse {
    /// Name of the invoked tool
    pub tool: String,

    /// Parsed JSON returned by Canva, unmodified
    pub result: serde_json::Value,
}
