//! Declarative endpoint records
//!
//! Every Canva REST operation is one [`Endpoint`]: a verb, a path template and
//! the names of the arguments that go into the path, the query string or the
//! JSON body. [`Endpoint::build`] turns a JSON argument bag into an
//! [`ApiRequest`]; [`interpret_response`] turns the raw response back into
//! JSON or an error. No endpoint has hand-written request code.

use crate::error::{CanvaError, Result};
use crate::transport::{ApiRequest, ApiResponse, HttpMethod};
use serde::Serialize;
use serde_json::{Map, Value};

/// Argument name under which raw-body endpoints take their payload
pub const REQUEST_BODY_ARG: &str = "request_body";

/// One REST operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Tool name (verb + purpose)
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path template with `{paramName}` placeholders
    pub path: &'static str,
    /// Required arguments substituted into the path, in template order
    pub path_params: &'static [&'static str],
    /// Optional query parameters
    pub query_params: &'static [&'static str],
    /// Optional JSON body fields
    pub body_fields: &'static [&'static str],
    /// Body is passed through verbatim from the `request_body` argument
    pub raw_body: bool,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

impl Endpoint {
    const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        description: &'static str,
        tags: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            method,
            path,
            path_params: &[],
            query_params: &[],
            body_fields: &[],
            raw_body: false,
            description,
            tags,
        }
    }

    /// Resolve the endpoint against `base_url` with the given arguments.
    ///
    /// `args` must be a JSON object (null counts as no arguments). Arguments
    /// the endpoint does not declare are ignored.
    ///
    /// # Errors
    ///
    /// [`CanvaError::MissingParameter`] if a path parameter is absent, null or
    /// empty; [`CanvaError::InvalidParameter`] if an argument has a shape that
    /// cannot be placed where it is declared.
    pub fn build(&self, base_url: &str, args: &Value) -> Result<ApiRequest> {
        let empty = Map::new();
        let args = match args {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(CanvaError::InvalidParameter {
                    name: "arguments".to_string(),
                    reason: format!("expected a JSON object, got {}", json_type(other)),
                })
            }
        };

        let mut path = self.path.to_string();
        for name in self.path_params {
            let segment = path_segment(name, args.get(*name))?;
            path = path.replace(&format!("{{{}}}", name), &urlencoding::encode(&segment));
        }

        let mut query = Vec::new();
        for name in self.query_params {
            if let Some(value) = present(args.get(*name)) {
                query.push((name.to_string(), query_value(name, value)?));
            }
        }

        let body = self.build_body(args)?;

        let url = format!("{}{}", base_url.trim_end_matches('/'), path);

        Ok(ApiRequest {
            method: self.method,
            path,
            url,
            query,
            body,
        })
    }

    fn build_body(&self, args: &Map<String, Value>) -> Result<Option<Value>> {
        if !self.method.allows_body() {
            return Ok(None);
        }

        if self.raw_body {
            return match present(args.get(REQUEST_BODY_ARG)) {
                None => Ok(None),
                Some(Value::Object(map)) => Ok(Some(Value::Object(strip_nulls(map)))),
                Some(other) => Err(CanvaError::InvalidParameter {
                    name: REQUEST_BODY_ARG.to_string(),
                    reason: format!("expected a JSON object, got {}", json_type(other)),
                }),
            };
        }

        if self.body_fields.is_empty() {
            return Ok(None);
        }

        let body: Map<String, Value> = self
            .body_fields
            .iter()
            .filter_map(|field| present(args.get(*field)).map(|v| (field.to_string(), v.clone())))
            .collect();

        Ok(Some(Value::Object(body)))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

/// Turn a raw response into JSON, failing on any non-2xx status.
///
/// An empty success body (typical of DELETE) yields `Value::Null`.
pub fn interpret_response(response: ApiResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(CanvaError::Http {
            status: response.status,
            body: response.body,
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body)
        .map_err(|e| CanvaError::InvalidResponse(format!("Failed to parse JSON body: {}", e)))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn strip_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn path_segment(name: &str, value: Option<&Value>) -> Result<String> {
    match present(value) {
        None => Err(CanvaError::MissingParameter(name.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(CanvaError::MissingParameter(name.to_string()))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(CanvaError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected a string, got {}", json_type(other)),
        }),
    }
}

fn query_value(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        // comma-delimited lists, e.g. item_types=design,folder
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::Object(_) | Value::Null => {
                    Err(CanvaError::InvalidParameter {
                        name: name.to_string(),
                        reason: format!("list items must be scalars, got {}", json_type(item)),
                    })
                }
                scalar => query_value(name, scalar),
            })
            .collect::<Result<Vec<_>>>()
            .map(|parts| parts.join(",")),
        other => Err(CanvaError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected a scalar, got {}", json_type(other)),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Endpoint table
// ---------------------------------------------------------------------------

pub const GET_APP_JWKS: Endpoint = Endpoint {
    path_params: &["appId"],
    ..Endpoint::new(
        "get_app_jwks",
        HttpMethod::Get,
        "/v1/apps/{appId}/jwks",
        "Retrieves the JSON Web Key Set used to verify JWTs issued for an app.",
        &["app"],
    )
};

pub const GET_ASSET: Endpoint = Endpoint {
    path_params: &["assetId"],
    ..Endpoint::new(
        "get_asset",
        HttpMethod::Get,
        "/v1/assets/{assetId}",
        "Retrieves the metadata of an asset.",
        &["asset"],
    )
};

pub const UPDATE_ASSET_FULL: Endpoint = Endpoint {
    path_params: &["assetId"],
    body_fields: &["name", "tags"],
    ..Endpoint::new(
        "update_asset_full",
        HttpMethod::Post,
        "/v1/assets/{assetId}",
        "Updates the name and tags of an asset.",
        &["asset"],
    )
};

pub const DELETE_ASSET: Endpoint = Endpoint {
    path_params: &["assetId"],
    ..Endpoint::new(
        "delete_asset",
        HttpMethod::Delete,
        "/v1/assets/{assetId}",
        "Deletes an asset.",
        &["asset"],
    )
};

pub const UPDATE_ASSET_PARTIAL: Endpoint = Endpoint {
    path_params: &["assetId"],
    body_fields: &["name", "tags"],
    ..Endpoint::new(
        "update_asset_partial",
        HttpMethod::Patch,
        "/v1/assets/{assetId}",
        "Updates only the supplied properties of an asset.",
        &["asset"],
    )
};

pub const UPLOAD_ASSET: Endpoint = Endpoint {
    raw_body: true,
    ..Endpoint::new(
        "upload_asset",
        HttpMethod::Post,
        "/v1/assets/upload",
        "Uploads an asset described by the given metadata.",
        &["asset"],
    )
};

pub const CREATE_ASSET_UPLOAD_JOB: Endpoint = Endpoint {
    raw_body: true,
    ..Endpoint::new(
        "create_asset_upload_job",
        HttpMethod::Post,
        "/v1/asset-uploads",
        "Starts an asynchronous asset upload job.",
        &["asset"],
    )
};

pub const GET_ASSET_UPLOAD_JOB: Endpoint = Endpoint {
    path_params: &["jobId"],
    ..Endpoint::new(
        "get_asset_upload_job",
        HttpMethod::Get,
        "/v1/asset-uploads/{jobId}",
        "Polls the status and result of an asset upload job.",
        &["asset"],
    )
};

pub const CREATE_AUTOFILL_JOB: Endpoint = Endpoint {
    body_fields: &["brand_template_id", "data", "preview", "title"],
    ..Endpoint::new(
        "create_autofill_job",
        HttpMethod::Post,
        "/v1/autofills",
        "Starts a job that fills a brand template's dataset fields with the given data.",
        &["autofill"],
    )
};

pub const GET_AUTOFILL_JOB: Endpoint = Endpoint {
    path_params: &["jobId"],
    ..Endpoint::new(
        "get_autofill_job",
        HttpMethod::Get,
        "/v1/autofills/{jobId}",
        "Polls the status and result of an autofill job.",
        &["autofill"],
    )
};

pub const LIST_BRAND_TEMPLATES: Endpoint = Endpoint {
    query_params: &["query", "continuation", "ownership", "sort_by"],
    ..Endpoint::new(
        "list_brand_templates",
        HttpMethod::Get,
        "/v1/brand-templates",
        "Lists one page of brand templates, optionally filtered and sorted. Pass the returned continuation token to fetch the next page.",
        &["brand_template", "important"],
    )
};

pub const GET_BRAND_TEMPLATE: Endpoint = Endpoint {
    path_params: &["brandTemplateId"],
    ..Endpoint::new(
        "get_brand_template",
        HttpMethod::Get,
        "/v1/brand-templates/{brandTemplateId}",
        "Retrieves the metadata of a brand template.",
        &["brand_template"],
    )
};

pub const GET_BRAND_TEMPLATE_DATASET: Endpoint = Endpoint {
    path_params: &["brandTemplateId"],
    ..Endpoint::new(
        "get_brand_template_dataset",
        HttpMethod::Get,
        "/v1/brand-templates/{brandTemplateId}/dataset",
        "Retrieves the dataset definition (fillable field names and types) of a brand template.",
        &["brand_template"],
    )
};

pub const CREATE_COMMENT: Endpoint = Endpoint {
    body_fields: &["assignee_id", "attached_to", "message"],
    ..Endpoint::new(
        "create_comment",
        HttpMethod::Post,
        "/v1/comments",
        "Creates a comment attached to a design.",
        &["comment"],
    )
};

pub const CREATE_COMMENT_REPLY: Endpoint = Endpoint {
    path_params: &["commentId"],
    body_fields: &["attached_to", "message"],
    ..Endpoint::new(
        "create_comment_reply",
        HttpMethod::Post,
        "/v1/comments/{commentId}/replies",
        "Replies to an existing comment.",
        &["comment"],
    )
};

pub const GET_DESIGN_COMMENT: Endpoint = Endpoint {
    path_params: &["designId", "commentId"],
    ..Endpoint::new(
        "get_design_comment",
        HttpMethod::Get,
        "/v1/designs/{designId}/comments/{commentId}",
        "Retrieves a comment on a design.",
        &["comment"],
    )
};

pub const GET_CONNECT_KEYS: Endpoint = Endpoint::new(
    "get_connect_keys",
    HttpMethod::Get,
    "/v1/connect/keys",
    "Retrieves the public keys used to verify Connect webhook signatures.",
    &["connect"],
);

pub const LIST_DESIGNS: Endpoint = Endpoint {
    query_params: &["query", "continuation", "ownership", "sort_by"],
    ..Endpoint::new(
        "list_designs",
        HttpMethod::Get,
        "/v1/designs",
        "Lists one page of the user's designs, optionally filtered and sorted. Pass the returned continuation token to fetch the next page.",
        &["design", "important"],
    )
};

pub const CREATE_DESIGN: Endpoint = Endpoint {
    body_fields: &["asset_id", "design_type", "title"],
    ..Endpoint::new(
        "create_design",
        HttpMethod::Post,
        "/v1/designs",
        "Creates a new design.",
        &["design"],
    )
};

pub const GET_DESIGN: Endpoint = Endpoint {
    path_params: &["designId"],
    ..Endpoint::new(
        "get_design",
        HttpMethod::Get,
        "/v1/designs/{designId}",
        "Retrieves the metadata of a design.",
        &["design"],
    )
};

pub const CREATE_DESIGN_IMPORT_JOB: Endpoint = Endpoint {
    raw_body: true,
    ..Endpoint::new(
        "create_design_import_job",
        HttpMethod::Post,
        "/v1/imports",
        "Starts a job that imports an external file as a new design.",
        &["design_import"],
    )
};

pub const GET_DESIGN_IMPORT_JOB: Endpoint = Endpoint {
    path_params: &["jobId"],
    ..Endpoint::new(
        "get_design_import_job",
        HttpMethod::Get,
        "/v1/imports/{jobId}",
        "Polls the status and result of a design import job.",
        &["design_import"],
    )
};

pub const CREATE_DESIGN_EXPORT_JOB: Endpoint = Endpoint {
    body_fields: &["design_id", "format"],
    ..Endpoint::new(
        "create_design_export_job",
        HttpMethod::Post,
        "/v1/exports",
        "Starts a job that exports a design to the requested file format.",
        &["export"],
    )
};

pub const GET_DESIGN_EXPORT_JOB: Endpoint = Endpoint {
    path_params: &["exportId"],
    ..Endpoint::new(
        "get_design_export_job",
        HttpMethod::Get,
        "/v1/exports/{exportId}",
        "Polls the status and download URLs of a design export job.",
        &["export"],
    )
};

pub const GET_FOLDER: Endpoint = Endpoint {
    path_params: &["folderId"],
    ..Endpoint::new(
        "get_folder",
        HttpMethod::Get,
        "/v1/folders/{folderId}",
        "Retrieves the metadata of a folder.",
        &["folder"],
    )
};

pub const DELETE_FOLDER: Endpoint = Endpoint {
    path_params: &["folderId"],
    ..Endpoint::new(
        "delete_folder",
        HttpMethod::Delete,
        "/v1/folders/{folderId}",
        "Deletes a folder.",
        &["folder"],
    )
};

pub const UPDATE_FOLDER: Endpoint = Endpoint {
    path_params: &["folderId"],
    body_fields: &["name"],
    ..Endpoint::new(
        "update_folder",
        HttpMethod::Patch,
        "/v1/folders/{folderId}",
        "Renames a folder.",
        &["folder"],
    )
};

pub const LIST_FOLDER_ITEMS: Endpoint = Endpoint {
    path_params: &["folderId"],
    query_params: &["continuation", "item_types"],
    ..Endpoint::new(
        "list_folder_items",
        HttpMethod::Get,
        "/v1/folders/{folderId}/items",
        "Lists one page of the items in a folder, optionally filtered by item type (asset, design, folder, template). Pass the returned continuation token to fetch the next page.",
        &["folder"],
    )
};

pub const MOVE_FOLDER_ITEM: Endpoint = Endpoint {
    body_fields: &["from_folder_id", "item_id", "to_folder_id"],
    ..Endpoint::new(
        "move_folder_item",
        HttpMethod::Post,
        "/v1/folders/move",
        "Moves an item from one folder to another.",
        &["folder"],
    )
};

pub const CREATE_FOLDER: Endpoint = Endpoint {
    body_fields: &["name", "parent_folder_id"],
    ..Endpoint::new(
        "create_folder",
        HttpMethod::Post,
        "/v1/folders",
        "Creates a folder, optionally inside a parent folder.",
        &["folder"],
    )
};

pub const GET_CURRENT_USER: Endpoint = Endpoint::new(
    "get_current_user",
    HttpMethod::Get,
    "/v1/users/me",
    "Retrieves the user and team IDs of the authenticated user.",
    &["user", "important"],
);

pub const GET_CURRENT_USER_PROFILE: Endpoint = Endpoint::new(
    "get_current_user_profile",
    HttpMethod::Get,
    "/v1/users/me/profile",
    "Retrieves the profile of the authenticated user.",
    &["user"],
);

/// Every endpoint, in registration order
pub static ENDPOINTS: &[Endpoint] = &[
    GET_APP_JWKS,
    GET_ASSET,
    UPDATE_ASSET_FULL,
    DELETE_ASSET,
    UPDATE_ASSET_PARTIAL,
    UPLOAD_ASSET,
    CREATE_ASSET_UPLOAD_JOB,
    GET_ASSET_UPLOAD_JOB,
    CREATE_AUTOFILL_JOB,
    GET_AUTOFILL_JOB,
    LIST_BRAND_TEMPLATES,
    GET_BRAND_TEMPLATE,
    GET_BRAND_TEMPLATE_DATASET,
    CREATE_COMMENT,
    CREATE_COMMENT_REPLY,
    GET_DESIGN_COMMENT,
    GET_CONNECT_KEYS,
    LIST_DESIGNS,
    CREATE_DESIGN,
    GET_DESIGN,
    CREATE_DESIGN_IMPORT_JOB,
    GET_DESIGN_IMPORT_JOB,
    CREATE_DESIGN_EXPORT_JOB,
    GET_DESIGN_EXPORT_JOB,
    GET_FOLDER,
    DELETE_FOLDER,
    UPDATE_FOLDER,
    LIST_FOLDER_ITEMS,
    MOVE_FOLDER_ITEM,
    CREATE_FOLDER,
    GET_CURRENT_USER,
    GET_CURRENT_USER_PROFILE,
];

/// Find an endpoint by tool name
pub fn find_endpoint(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|endpoint| endpoint.name == name)
}
