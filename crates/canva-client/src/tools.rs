//! Tool directory
//!
//! Lists every endpoint method as a named, invocable tool so a hosting
//! framework can register them without knowing the Canva API.

use crate::app::CanvaApp;
use crate::endpoint::{find_endpoint, Endpoint, ENDPOINTS, REQUEST_BODY_ARG};
use crate::error::{CanvaError, Result};
use crate::transport::HttpMethod;
use serde::Serialize;
use serde_json::Value;

/// Argument names of a tool, grouped by where they end up in the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolParameters {
    /// Required
    pub path: &'static [&'static str],
    pub query: &'static [&'static str],
    pub body: &'static [&'static str],
    /// Name of the free-form body argument, for raw-body endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<&'static str>,
}

/// One invocable tool
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub method: HttpMethod,
    pub path: &'static str,
    pub parameters: ToolParameters,
    #[serde(skip)]
    endpoint: &'static Endpoint,
}

impl Tool {
    pub fn endpoint(&self) -> &'static Endpoint {
        self.endpoint
    }

    /// Invoke this tool with a JSON object of arguments
    pub async fn call(&self, app: &CanvaApp, args: Value) -> Result<Value> {
        app.execute(self.endpoint, args).await
    }
}

impl From<&'static Endpoint> for Tool {
    fn from(endpoint: &'static Endpoint) -> Self {
        Self {
            name: endpoint.name,
            description: endpoint.description,
            tags: endpoint.tags,
            method: endpoint.method,
            path: endpoint.path,
            parameters: ToolParameters {
                path: endpoint.path_params,
                query: endpoint.query_params,
                body: endpoint.body_fields,
                request_body: endpoint.raw_body.then_some(REQUEST_BODY_ARG),
            },
            endpoint,
        }
    }
}

impl CanvaApp {
    /// Every tool, in registration order
    pub fn list_tools(&self) -> Vec<Tool> {
        ENDPOINTS.iter().map(Tool::from).collect()
    }

    /// Look up a tool by name
    pub fn tool(&self, name: &str) -> Option<Tool> {
        find_endpoint(name).map(Tool::from)
    }

    /// Invoke a tool by name
    ///
    /// # Errors
    ///
    /// [`CanvaError::UnknownTool`] if no tool has this name, otherwise
    /// whatever the endpoint call produces.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value> {
        let endpoint =
            find_endpoint(name).ok_or_else(|| CanvaError::UnknownTool(name.to_string()))?;

        tracing::info!(tool = name, "Invoking tool");
        self.execute(endpoint, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::MockTransport;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn mock_app() -> (CanvaApp, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let app = CanvaApp::with_transport(ClientConfig::default(), transport.clone()).unwrap();
        (app, transport)
    }

    #[test]
    fn test_list_tools_is_complete_and_distinct() {
        let (app, _) = mock_app();
        let tools = app.list_tools();

        assert_eq!(tools.len(), ENDPOINTS.len());
        let names: HashSet<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn test_list_tools_keeps_registration_order() {
        let (app, _) = mock_app();
        let tools = app.list_tools();

        assert_eq!(tools.first().unwrap().name, "get_app_jwks");
        assert_eq!(tools.last().unwrap().name, "get_current_user_profile");
    }

    #[test]
    fn test_tool_descriptor_serialization() {
        let (app, _) = mock_app();
        let tool = app.tool("list_folder_items").unwrap();
        let value = serde_json::to_value(&tool).unwrap();

        assert_eq!(value["method"], "GET");
        assert_eq!(value["path"], "/v1/folders/{folderId}/items");
        assert_eq!(value["parameters"]["path"], json!(["folderId"]));
        assert_eq!(
            value["parameters"]["query"],
            json!(["continuation", "item_types"])
        );
        assert!(value["parameters"].get("request_body").is_none());
        assert!(value.get("endpoint").is_none());
    }

    #[test]
    fn test_raw_body_tool_advertises_request_body() {
        let (app, _) = mock_app();
        let tool = app.tool("create_design_import_job").unwrap();
        assert_eq!(tool.parameters.request_body, Some("request_body"));
    }

    #[tokio::test]
    async fn test_call_tool_by_name() {
        let (app, transport) = mock_app();
        app.call_tool("get_folder", json!({"folderId": "F1"}))
            .await
            .unwrap();

        assert_eq!(transport.last_request().await.unwrap().path, "/v1/folders/F1");
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let (app, transport) = mock_app();
        let err = app.call_tool("v1_folders1", json!({})).await.unwrap_err();

        assert!(matches!(err, CanvaError::UnknownTool(ref name) if name == "v1_folders1"));
        assert_eq!(transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_tool_reference_is_callable() {
        let (app, transport) = mock_app();
        let tool = app.tool("get_connect_keys").unwrap();
        tool.call(&app, Value::Null).await.unwrap();

        assert_eq!(tool.endpoint().path, "/v1/connect/keys");
        assert_eq!(transport.call_count().await, 1);
    }
}
