//! Notion REST endpoints and how an argument object is split into path,
//! query and body parameters for each of them.

use serde_json::{Map, Value};

use crate::error::{NotionClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    /// Dotted SDK-style name, e.g. `blocks.children.list`.
    pub name: &'static str,
    pub method: Method,
    /// Path below `/v1/`, with `{param}` placeholders.
    pub path: &'static str,
    pub path_params: &'static [&'static str],
    pub query_params: &'static [&'static str],
    /// Whether the remaining argument keys are sent as the JSON body.
    pub has_body: bool,
}

pub const BLOCKS_RETRIEVE: Endpoint = Endpoint {
    name: "blocks.retrieve",
    method: Method::Get,
    path: "blocks/{block_id}",
    path_params: &["block_id"],
    query_params: &[],
    has_body: false,
};

pub const BLOCKS_UPDATE: Endpoint = Endpoint {
    name: "blocks.update",
    method: Method::Patch,
    path: "blocks/{block_id}",
    path_params: &["block_id"],
    query_params: &[],
    has_body: true,
};

pub const BLOCKS_DELETE: Endpoint = Endpoint {
    name: "blocks.delete",
    method: Method::Delete,
    path: "blocks/{block_id}",
    path_params: &["block_id"],
    query_params: &[],
    has_body: false,
};

pub const BLOCKS_CHILDREN_LIST: Endpoint = Endpoint {
    name: "blocks.children.list",
    method: Method::Get,
    path: "blocks/{block_id}/children",
    path_params: &["block_id"],
    query_params: &["start_cursor", "page_size"],
    has_body: false,
};

pub const BLOCKS_CHILDREN_APPEND: Endpoint = Endpoint {
    name: "blocks.children.append",
    method: Method::Patch,
    path: "blocks/{block_id}/children",
    path_params: &["block_id"],
    query_params: &[],
    has_body: true,
};

pub const PAGES_RETRIEVE: Endpoint = Endpoint {
    name: "pages.retrieve",
    method: Method::Get,
    path: "pages/{page_id}",
    path_params: &["page_id"],
    query_params: &["filter_properties"],
    has_body: false,
};

pub const PAGES_UPDATE: Endpoint = Endpoint {
    name: "pages.update",
    method: Method::Patch,
    path: "pages/{page_id}",
    path_params: &["page_id"],
    query_params: &[],
    has_body: true,
};

pub const PAGES_PROPERTIES_RETRIEVE: Endpoint = Endpoint {
    name: "pages.properties.retrieve",
    method: Method::Get,
    path: "pages/{page_id}/properties/{property_id}",
    path_params: &["page_id", "property_id"],
    query_params: &["start_cursor", "page_size"],
    has_body: false,
};

pub const USERS_LIST: Endpoint = Endpoint {
    name: "users.list",
    method: Method::Get,
    path: "users",
    path_params: &[],
    query_params: &["start_cursor", "page_size"],
    has_body: false,
};

pub const USERS_RETRIEVE: Endpoint = Endpoint {
    name: "users.retrieve",
    method: Method::Get,
    path: "users/{user_id}",
    path_params: &["user_id"],
    query_params: &[],
    has_body: false,
};

pub const SEARCH: Endpoint = Endpoint {
    name: "search",
    method: Method::Post,
    path: "search",
    path_params: &[],
    query_params: &[],
    has_body: true,
};

pub const DATABASES_RETRIEVE: Endpoint = Endpoint {
    name: "databases.retrieve",
    method: Method::Get,
    path: "databases/{database_id}",
    path_params: &["database_id"],
    query_params: &[],
    has_body: false,
};

pub const DATABASES_UPDATE: Endpoint = Endpoint {
    name: "databases.update",
    method: Method::Patch,
    path: "databases/{database_id}",
    path_params: &["database_id"],
    query_params: &[],
    has_body: true,
};

pub const DATABASES_QUERY: Endpoint = Endpoint {
    name: "databases.query",
    method: Method::Post,
    path: "databases/{database_id}/query",
    path_params: &["database_id"],
    query_params: &["filter_properties"],
    has_body: true,
};

/// A request ready to be sent: relative path, query pairs and optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Endpoint {
    /// Split `args` into path, query and body parts.
    ///
    /// `args` must be a JSON object (`null` counts as empty). Path parameters
    /// are required and percent-encoded; unknown keys go to the body when the
    /// endpoint has one and are dropped otherwise.
    pub fn prepare(&self, args: Value) -> Result<PreparedRequest> {
        let mut obj = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(NotionClientError::InvalidArgument(format!(
                    "{} expects an object argument, got {}",
                    self.name,
                    json_kind(&other)
                )))
            }
        };

        let mut path = self.path.to_string();
        for name in self.path_params {
            let value = obj
                .remove(*name)
                .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
                .ok_or_else(|| NotionClientError::InvalidArgument(format!("{}: `{}` is required", self.name, name)))?;
            path = path.replace(&format!("{{{}}}", name), &urlencoding::encode(&value));
        }

        let mut query = Vec::new();
        for name in self.query_params {
            if let Some(value) = obj.remove(*name) {
                push_query(&mut query, name, &value);
            }
        }

        let body = if self.has_body { Some(Value::Object(obj)) } else { None };
        Ok(PreparedRequest { path, query, body })
    }
}

fn push_query(query: &mut Vec<(String, String)>, name: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => query.push((name.to_string(), s.clone())),
        Value::Array(items) => {
            for item in items {
                push_query(query, name, item);
            }
        }
        other => query.push((name.to_string(), other.to_string())),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
