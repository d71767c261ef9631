//! Custom extractors

use crate::error::ServerError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

/// Tool arguments: a JSON object, or an empty body for tools without arguments
///
/// The content type is not checked; any body is parsed as JSON.
pub struct ToolArguments(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for ToolArguments
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ServerError::InvalidRequest(format!("Failed to read request body: {}", rejection))
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|err| ServerError::InvalidRequest(format!("JSON syntax error: {}", err)))?;

        match value {
            Value::Object(_) => Ok(Self(value)),
            Value::Null => Ok(Self(Value::Object(Map::new()))),
            _ => Err(ServerError::InvalidRequest(
                "Tool arguments must be a JSON object".to_string(),
            )),
        }
    }
}
