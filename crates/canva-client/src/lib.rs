//! Canva Connect REST API client
//!
//! This crate exposes the Canva REST API (assets, designs, folders, exports,
//! imports, autofills, comments, brand templates, users) as a flat set of
//! async methods and as a directory of named tools:
//! - Endpoint records: one declarative [`Endpoint`] per REST operation
//! - Method set: typed [`CanvaApp`] methods built on a single `execute` helper
//! - Tool directory: [`CanvaApp::list_tools`] / [`CanvaApp::call_tool`]
//!
//! **Note**: each call is exactly one HTTP round trip. There is no retry,
//! caching or internal pagination; list endpoints return one page and a
//! continuation token.

// Re-export core types
pub use app::{continuation_token, AutofillRequest, CanvaApp, ListOptions};
pub use config::{ClientConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
pub use credentials::{ApiKeyCredentials, CredentialProvider};
pub use endpoint::{find_endpoint, interpret_response, Endpoint, ENDPOINTS};
pub use error::{CanvaError, Result};
pub use tools::{Tool, ToolParameters};
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, MockTransport, ReqwestTransport,
};

pub mod app;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod tools;
pub mod transport;
