//! Route handlers.
//!
//! Every endpoint runs the same template: check the path parameters, read
//! the query string or body, call one Notion operation with the merged
//! argument object, and return the result or a normalized error. The
//! per-resource modules only describe *which* parameters, input and
//! operation each route uses.

pub mod blocks;
pub mod databases;
pub mod pages;
pub mod search;
pub mod users;

use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use notion_client::NotionApi;
use serde_json::{Map, Value};

use crate::context::ServerUtils;
use crate::error::NormalizedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RetrieveBlock,
    UpdateBlock,
    DeleteBlock,
    ListBlockChildren,
    AppendBlockChildren,
    RetrievePage,
    UpdatePage,
    RetrievePageProperty,
    ListUsers,
    RetrieveUser,
    Search,
    RetrieveDatabase,
    UpdateDatabase,
    QueryDatabase,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::RetrieveBlock => "blocks.retrieve",
            Operation::UpdateBlock => "blocks.update",
            Operation::DeleteBlock => "blocks.delete",
            Operation::ListBlockChildren => "blocks.children.list",
            Operation::AppendBlockChildren => "blocks.children.append",
            Operation::RetrievePage => "pages.retrieve",
            Operation::UpdatePage => "pages.update",
            Operation::RetrievePageProperty => "pages.properties.retrieve",
            Operation::ListUsers => "users.list",
            Operation::RetrieveUser => "users.retrieve",
            Operation::Search => "search",
            Operation::RetrieveDatabase => "databases.retrieve",
            Operation::UpdateDatabase => "databases.update",
            Operation::QueryDatabase => "databases.query",
        }
    }

    pub async fn invoke(self, client: &dyn NotionApi, args: Value) -> notion_client::Result<Value> {
        match self {
            Operation::RetrieveBlock => client.retrieve_block(args).await,
            Operation::UpdateBlock => client.update_block(args).await,
            Operation::DeleteBlock => client.delete_block(args).await,
            Operation::ListBlockChildren => client.list_block_children(args).await,
            Operation::AppendBlockChildren => client.append_block_children(args).await,
            Operation::RetrievePage => client.retrieve_page(args).await,
            Operation::UpdatePage => client.update_page(args).await,
            Operation::RetrievePageProperty => client.retrieve_page_property(args).await,
            Operation::ListUsers => client.list_users(args).await,
            Operation::RetrieveUser => client.retrieve_user(args).await,
            Operation::Search => client.search(args).await,
            Operation::RetrieveDatabase => client.retrieve_database(args).await,
            Operation::UpdateDatabase => client.update_database(args).await,
            Operation::QueryDatabase => client.query_database(args).await,
        }
    }
}

/// Binds a route parameter to the argument key the Notion operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamBinding {
    pub route: &'static str,
    pub arg: &'static str,
}

/// What, besides path parameters, a handler forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    None,
    Query,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSpec {
    pub operation: Operation,
    pub params: &'static [ParamBinding],
    pub input: Input,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Malformed,
}

/// Everything a handler may read from an inbound request.
///
/// Extraction never fails: bad path or query data shows up as missing
/// values and an unreadable body as [`RequestBody::Malformed`], so the
/// handler can answer with a normalized error.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub params: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ProxyRequest {
    pub fn new(params: HashMap<String, String>, query: Vec<(String, String)>, body: RequestBody) -> Self {
        Self { params, query, body }
    }
}

impl<S> FromRequest<S> for ProxyRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(p)| p)
            .unwrap_or_default();
        let query = Query::<Vec<(String, String)>>::from_request_parts(&mut parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or_default();

        let body = match Bytes::from_request(Request::from_parts(parts, body), state).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => RequestBody::Empty,
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(json) => RequestBody::Json(json),
                Err(_) => RequestBody::Malformed,
            },
            Err(_) => RequestBody::Malformed,
        };

        Ok(Self { params, query, body })
    }
}

/// Query pairs as an argument object; repeated keys become arrays.
fn query_args(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut args = Map::new();
    for (key, value) in pairs {
        match args.get_mut(&key) {
            Some(Value::Array(items)) => items.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                args.insert(key, Value::String(value));
            }
        }
    }
    args
}

/// Run one handler invocation.
pub async fn handle<U>(utils: &U, spec: &HandlerSpec, req: ProxyRequest) -> Result<Value, NormalizedError>
where
    U: ServerUtils + ?Sized,
{
    let operation = spec.operation.name();

    let mut path_args = Map::new();
    for binding in spec.params {
        match req.params.get(binding.route).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(value) => {
                path_args.insert(binding.arg.to_string(), Value::String(value.to_string()));
            }
            None => {
                tracing::warn!(target: "proxy.handler", operation, param = binding.route, "missing path parameter");
                return Err(NormalizedError::bad_request());
            }
        }
    }

    let mut args = match spec.input {
        Input::None => Map::new(),
        Input::Query => query_args(req.query),
        Input::Body => match req.body {
            RequestBody::Empty | RequestBody::Json(Value::Null) => Map::new(),
            RequestBody::Json(Value::Object(fields)) => fields,
            RequestBody::Json(_) | RequestBody::Malformed => {
                tracing::warn!(target: "proxy.handler", operation, "request body is not a JSON object");
                return Err(NormalizedError::bad_request());
            }
        },
    };
    // Route parameters identify the resource and win over same-named body fields.
    args.extend(path_args);

    let client = utils.get_client();
    match spec.operation.invoke(&*client, Value::Object(args)).await {
        Ok(result) => Ok(result),
        Err(e) => {
            let mapped = utils.map_error(&e);
            if e.is_notion_client_error() {
                tracing::warn!(
                    target: "proxy.handler",
                    operation,
                    status = mapped.status_code,
                    error.code = ?e.code().map(|c| c.as_str()),
                    error.message = %mapped.message,
                    "notion rejected request"
                );
            } else {
                tracing::error!(target: "proxy.handler", operation, error = %e, "notion call failed");
            }
            Err(mapped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeated_query_keys_become_arrays() {
        let args = query_args(vec![
            ("filter_properties".into(), "title".into()),
            ("filter_properties".into(), "status".into()),
            ("filter_properties".into(), "tags".into()),
            ("page_size".into(), "10".into()),
        ]);
        assert_eq!(Value::Object(args), json!({"filter_properties": ["title", "status", "tags"], "page_size": "10"}));
    }
}
