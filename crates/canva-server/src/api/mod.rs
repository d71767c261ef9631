//! REST API implementation
//!
//! - types: Request/response type definitions
//! - extractors: Custom request extractors
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration

mod extractors;
mod handlers;
mod router;
pub mod types;

pub use extractors::ToolArguments;
pub use router::create_router;
pub use types::{AppState, HealthResponse, ToolCallResponse, ToolListResponse};
