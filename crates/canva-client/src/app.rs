//! Canva endpoint method set
//!
//! [`CanvaApp`] exposes one async method per Canva REST operation. Each method
//! only assembles its argument bag; the request is built from the matching
//! [`Endpoint`] record and dispatched through [`CanvaApp::execute`].
//!
//! # Usage
//!
//! ```no_run
//! use canva_client::{CanvaApp, ClientConfig, ListOptions};
//!
//! #[tokio::main]
//! async fn main() -> canva_client::Result<()> {
//!     let app = CanvaApp::from_env(ClientConfig::default())?;
//!
//!     let mut options = ListOptions::new().with_ownership("owned");
//!     loop {
//!         let page = app.list_designs(&options).await?;
//!         // ... use page["items"]
//!         match canva_client::continuation_token(&page) {
//!             Some(token) => options = options.with_continuation(token),
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use crate::config::ClientConfig;
use crate::credentials::{ApiKeyCredentials, CredentialProvider};
use crate::endpoint::{self, interpret_response, Endpoint};
use crate::error::Result;
use crate::transport::{HttpTransport, ReqwestTransport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Query options shared by the design and brand template listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Search term(s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Token from the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,

    /// Ownership filter (`owned`, `shared`, `any` for designs; a user ID for brand templates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<String>,

    /// Sort order, e.g. `relevance` or `modified_descending`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_continuation(mut self, continuation: impl Into<String>) -> Self {
        self.continuation = Some(continuation.into());
        self
    }

    pub fn with_ownership(mut self, ownership: impl Into<String>) -> Self {
        self.ownership = Some(ownership.into());
        self
    }

    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }
}

/// Autofill job request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutofillRequest {
    /// Brand template to fill
    pub brand_template_id: String,

    /// Field name -> typed value (`{"type": "text", "text": ...}`, `{"type": "image", "asset_id": ...}`)
    pub data: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<bool>,

    /// Title of the generated design
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AutofillRequest {
    pub fn new(brand_template_id: impl Into<String>, data: Value) -> Self {
        Self {
            brand_template_id: brand_template_id.into(),
            data,
            preview: None,
            title: None,
        }
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Continuation token of a list page, if more pages exist
pub fn continuation_token(page: &Value) -> Option<&str> {
    page.get("continuation")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
}

/// Canva REST API application
pub struct CanvaApp {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl CanvaApp {
    /// Create an app that talks to Canva over HTTPS
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config, credentials)?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create an app whose API key is read from `config.api_key_env`
    pub fn from_env(config: ClientConfig) -> Result<Self> {
        let credentials = ApiKeyCredentials::from_env(&config.api_key_env)?;
        Self::new(config, Arc::new(credentials))
    }

    /// Create an app around an arbitrary transport (tests, custom stacks)
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Name of the underlying transport
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Build, send and interpret one request for `endpoint`
    pub async fn execute(&self, endpoint: &Endpoint, args: Value) -> Result<Value> {
        let request = endpoint.build(self.config.normalized_base_url(), &args)?;

        debug!(
            tool = endpoint.name,
            method = %request.method,
            path = %request.path,
            "Calling Canva endpoint"
        );

        let response = self.transport.send(&request).await?;
        let status = response.status;

        interpret_response(response).map_err(|err| {
            warn!(tool = endpoint.name, status, "Canva endpoint failed: {}", err);
            err
        })
    }

    // -- apps -------------------------------------------------------------

    pub async fn get_app_jwks(&self, app_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_APP_JWKS, json!({ "appId": app_id }))
            .await
    }

    // -- assets -----------------------------------------------------------

    pub async fn get_asset(&self, asset_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_ASSET, json!({ "assetId": asset_id }))
            .await
    }

    /// Update an asset via POST
    pub async fn update_asset_full(
        &self,
        asset_id: &str,
        name: Option<&str>,
        tags: Option<Vec<String>>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::UPDATE_ASSET_FULL,
            json!({ "assetId": asset_id, "name": name, "tags": tags }),
        )
        .await
    }

    /// Delete an asset; the result is whatever the server acknowledges with
    /// (often `Value::Null`).
    pub async fn delete_asset(&self, asset_id: &str) -> Result<Value> {
        self.execute(&endpoint::DELETE_ASSET, json!({ "assetId": asset_id }))
            .await
    }

    /// Update an asset via PATCH
    pub async fn update_asset_partial(
        &self,
        asset_id: &str,
        name: Option<&str>,
        tags: Option<Vec<String>>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::UPDATE_ASSET_PARTIAL,
            json!({ "assetId": asset_id, "name": name, "tags": tags }),
        )
        .await
    }

    pub async fn upload_asset(&self, request_body: Option<Value>) -> Result<Value> {
        self.execute(
            &endpoint::UPLOAD_ASSET,
            json!({ "request_body": request_body }),
        )
        .await
    }

    pub async fn create_asset_upload_job(&self, request_body: Option<Value>) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_ASSET_UPLOAD_JOB,
            json!({ "request_body": request_body }),
        )
        .await
    }

    pub async fn get_asset_upload_job(&self, job_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_ASSET_UPLOAD_JOB, json!({ "jobId": job_id }))
            .await
    }

    // -- autofill ---------------------------------------------------------

    pub async fn create_autofill_job(&self, request: &AutofillRequest) -> Result<Value> {
        self.execute(&endpoint::CREATE_AUTOFILL_JOB, serde_json::to_value(request)?)
            .await
    }

    pub async fn get_autofill_job(&self, job_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_AUTOFILL_JOB, json!({ "jobId": job_id }))
            .await
    }

    // -- brand templates --------------------------------------------------

    /// One page of brand templates
    pub async fn list_brand_templates(&self, options: &ListOptions) -> Result<Value> {
        self.execute(&endpoint::LIST_BRAND_TEMPLATES, serde_json::to_value(options)?)
            .await
    }

    pub async fn get_brand_template(&self, brand_template_id: &str) -> Result<Value> {
        self.execute(
            &endpoint::GET_BRAND_TEMPLATE,
            json!({ "brandTemplateId": brand_template_id }),
        )
        .await
    }

    pub async fn get_brand_template_dataset(&self, brand_template_id: &str) -> Result<Value> {
        self.execute(
            &endpoint::GET_BRAND_TEMPLATE_DATASET,
            json!({ "brandTemplateId": brand_template_id }),
        )
        .await
    }

    // -- comments ---------------------------------------------------------

    pub async fn create_comment(
        &self,
        assignee_id: Option<&str>,
        attached_to: Option<Value>,
        message: Option<&str>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_COMMENT,
            json!({
                "assignee_id": assignee_id,
                "attached_to": attached_to,
                "message": message,
            }),
        )
        .await
    }

    pub async fn create_comment_reply(
        &self,
        comment_id: &str,
        attached_to: Option<Value>,
        message: Option<&str>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_COMMENT_REPLY,
            json!({
                "commentId": comment_id,
                "attached_to": attached_to,
                "message": message,
            }),
        )
        .await
    }

    pub async fn get_design_comment(&self, design_id: &str, comment_id: &str) -> Result<Value> {
        self.execute(
            &endpoint::GET_DESIGN_COMMENT,
            json!({ "designId": design_id, "commentId": comment_id }),
        )
        .await
    }

    // -- connect ----------------------------------------------------------

    pub async fn get_connect_keys(&self) -> Result<Value> {
        self.execute(&endpoint::GET_CONNECT_KEYS, json!({})).await
    }

    // -- designs ----------------------------------------------------------

    /// One page of designs
    pub async fn list_designs(&self, options: &ListOptions) -> Result<Value> {
        self.execute(&endpoint::LIST_DESIGNS, serde_json::to_value(options)?)
            .await
    }

    pub async fn create_design(
        &self,
        asset_id: Option<&str>,
        design_type: Option<Value>,
        title: Option<&str>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_DESIGN,
            json!({
                "asset_id": asset_id,
                "design_type": design_type,
                "title": title,
            }),
        )
        .await
    }

    pub async fn get_design(&self, design_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_DESIGN, json!({ "designId": design_id }))
            .await
    }

    // -- imports / exports ------------------------------------------------

    pub async fn create_design_import_job(&self, request_body: Option<Value>) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_DESIGN_IMPORT_JOB,
            json!({ "request_body": request_body }),
        )
        .await
    }

    pub async fn get_design_import_job(&self, job_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_DESIGN_IMPORT_JOB, json!({ "jobId": job_id }))
            .await
    }

    pub async fn create_design_export_job(
        &self,
        design_id: Option<&str>,
        format: Option<Value>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_DESIGN_EXPORT_JOB,
            json!({ "design_id": design_id, "format": format }),
        )
        .await
    }

    pub async fn get_design_export_job(&self, export_id: &str) -> Result<Value> {
        self.execute(
            &endpoint::GET_DESIGN_EXPORT_JOB,
            json!({ "exportId": export_id }),
        )
        .await
    }

    // -- folders ----------------------------------------------------------

    pub async fn get_folder(&self, folder_id: &str) -> Result<Value> {
        self.execute(&endpoint::GET_FOLDER, json!({ "folderId": folder_id }))
            .await
    }

    pub async fn delete_folder(&self, folder_id: &str) -> Result<Value> {
        self.execute(&endpoint::DELETE_FOLDER, json!({ "folderId": folder_id }))
            .await
    }

    pub async fn update_folder(&self, folder_id: &str, name: Option<&str>) -> Result<Value> {
        self.execute(
            &endpoint::UPDATE_FOLDER,
            json!({ "folderId": folder_id, "name": name }),
        )
        .await
    }

    /// One page of folder items. `item_types` is a comma-delimited filter
    /// over `asset`, `design`, `folder` and `template`.
    pub async fn list_folder_items(
        &self,
        folder_id: &str,
        continuation: Option<&str>,
        item_types: Option<&str>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::LIST_FOLDER_ITEMS,
            json!({
                "folderId": folder_id,
                "continuation": continuation,
                "item_types": item_types,
            }),
        )
        .await
    }

    pub async fn move_folder_item(
        &self,
        from_folder_id: Option<&str>,
        item_id: Option<&str>,
        to_folder_id: Option<&str>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::MOVE_FOLDER_ITEM,
            json!({
                "from_folder_id": from_folder_id,
                "item_id": item_id,
                "to_folder_id": to_folder_id,
            }),
        )
        .await
    }

    pub async fn create_folder(
        &self,
        name: Option<&str>,
        parent_folder_id: Option<&str>,
    ) -> Result<Value> {
        self.execute(
            &endpoint::CREATE_FOLDER,
            json!({ "name": name, "parent_folder_id": parent_folder_id }),
        )
        .await
    }

    // -- users ------------------------------------------------------------

    pub async fn get_current_user(&self) -> Result<Value> {
        self.execute(&endpoint::GET_CURRENT_USER, json!({})).await
    }

    pub async fn get_current_user_profile(&self) -> Result<Value> {
        self.execute(&endpoint::GET_CURRENT_USER_PROFILE, json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvaError;
    use crate::transport::{HttpMethod, MockTransport};

    fn mock_app() -> (CanvaApp, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let app = CanvaApp::with_transport(ClientConfig::default(), transport.clone()).unwrap();
        (app, transport)
    }

    #[test]
    fn test_list_options_builder() {
        let options = ListOptions::new()
            .with_query("poster")
            .with_sort_by("modified_descending");

        assert_eq!(options.query.as_deref(), Some("poster"));
        assert_eq!(options.sort_by.as_deref(), Some("modified_descending"));
        assert!(options.continuation.is_none());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"query": "poster", "sort_by": "modified_descending"})
        );
    }

    #[test]
    fn test_autofill_request_builder() {
        let request = AutofillRequest::new("BT1", json!({"headline": {"type": "text", "text": "Hi"}}))
            .with_title("Launch")
            .with_preview(true);

        assert_eq!(request.brand_template_id, "BT1");
        assert_eq!(request.title.as_deref(), Some("Launch"));
        assert_eq!(request.preview, Some(true));
    }

    #[test]
    fn test_continuation_token() {
        assert_eq!(
            continuation_token(&json!({"items": [], "continuation": "next"})),
            Some("next")
        );
        assert_eq!(continuation_token(&json!({"items": []})), None);
        assert_eq!(continuation_token(&json!({"continuation": ""})), None);
        assert_eq!(continuation_token(&Value::Null), None);
    }

    #[test]
    fn test_with_transport_rejects_invalid_config() {
        let result = CanvaApp::with_transport(
            ClientConfig::default().with_timeout_secs(0),
            Arc::new(MockTransport::new()),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_asset_targets_exact_path() {
        let (app, transport) = mock_app();
        app.get_asset("abc123").await.unwrap();

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/v1/assets/abc123");
        assert_eq!(request.url, "https://api.canva.com/rest/v1/assets/abc123");
    }

    #[tokio::test]
    async fn test_empty_path_param_fails_before_io() {
        let (app, transport) = mock_app();
        let err = app.get_design("").await.unwrap_err();

        assert!(matches!(err, CanvaError::MissingParameter(ref name) if name == "designId"));
        assert_eq!(transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_folder_with_name_only() {
        let (app, transport) = mock_app();
        app.create_folder(Some("Campaign"), None).await.unwrap();

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.path, "/v1/folders");
        assert_eq!(request.body, Some(json!({"name": "Campaign"})));
    }

    #[tokio::test]
    async fn test_update_asset_verbs() {
        let (app, transport) = mock_app();
        let tags = Some(vec!["summer".to_string()]);

        app.update_asset_full("A1", Some("Beach"), tags.clone()).await.unwrap();
        app.update_asset_partial("A1", None, tags).await.unwrap();
        app.delete_asset("A1").await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(
            requests[0].body,
            Some(json!({"name": "Beach", "tags": ["summer"]}))
        );
        assert_eq!(requests[1].method, HttpMethod::Patch);
        assert_eq!(requests[1].body, Some(json!({"tags": ["summer"]})));
        assert_eq!(requests[2].method, HttpMethod::Delete);
        assert!(requests.iter().all(|r| r.path == "/v1/assets/A1"));
    }

    #[tokio::test]
    async fn test_list_designs_passes_continuation() {
        let (app, transport) = mock_app();
        let options = ListOptions::new().with_continuation("page-2");
        app.list_designs(&options).await.unwrap();

        let request = transport.last_request().await.unwrap();
        assert_eq!(
            request.query,
            vec![("continuation".to_string(), "page-2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_autofill_job_body() {
        let (app, transport) = mock_app();
        let request = AutofillRequest::new("BT1", json!({"cover": {"type": "image", "asset_id": "A9"}}));
        app.create_autofill_job(&request).await.unwrap();

        let sent = transport.last_request().await.unwrap();
        assert_eq!(sent.path, "/v1/autofills");
        assert_eq!(
            sent.body,
            Some(json!({
                "brand_template_id": "BT1",
                "data": {"cover": {"type": "image", "asset_id": "A9"}}
            }))
        );
    }

    #[tokio::test]
    async fn test_remote_error_propagates_status() {
        let transport = Arc::new(MockTransport::with_json(
            403,
            json!({"code": "permission_denied"}),
        ));
        let app = CanvaApp::with_transport(ClientConfig::default(), transport).unwrap();

        let err = app.get_current_user().await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("permission_denied"));
    }
}
