//! Client-side plugin.
//!
//! Hands out a [`NotionProxyClient`] built from public runtime config only.
//! The client talks to this service's own routes, so it never needs (or
//! sees) the Notion token.

use std::time::Duration;

use async_trait::async_trait;
use notion_client::endpoints::{self, Endpoint};
use notion_client::{NotionApi, NotionClientError, Result, DEFAULT_TIMEOUT_MS};
use reqwest::Client;
use serde_json::Value;

use crate::config::PublicRuntimeConfig;
use crate::error::{ConfigError, NormalizedError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPlugin {
    public: PublicRuntimeConfig,
}

impl ClientPlugin {
    pub fn new(public: PublicRuntimeConfig) -> Self {
        Self { public }
    }

    pub fn public_config(&self) -> &PublicRuntimeConfig {
        &self.public
    }

    /// A client for the proxy served at `origin` (scheme, host and port).
    pub fn provide(&self, origin: &str) -> std::result::Result<NotionProxyClient, ConfigError> {
        let origin = origin.trim().trim_end_matches('/');
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(origin.to_string()));
        }
        let http = Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| ConfigError::Client(NotionClientError::Http(e)))?;
        Ok(NotionProxyClient { base: format!("{}{}", origin, self.public.api_base), http })
    }
}

/// [`NotionApi`] over the proxy routes instead of api.notion.com.
#[derive(Clone)]
pub struct NotionProxyClient {
    base: String,
    http: Client,
}

impl NotionProxyClient {
    pub fn base(&self) -> &str {
        &self.base
    }

    async fn call(&self, endpoint: &Endpoint, args: Value) -> Result<Value> {
        // Body routes of the proxy ignore the query string, so every non-path
        // key rides in the body and the server-side client splits it again.
        let endpoint = if endpoint.has_body { Endpoint { query_params: &[], ..*endpoint } } else { *endpoint };
        let prepared = endpoint.prepare(args)?;
        let url = format!("{}/{}", self.base, prepared.path);

        let mut req = self.http.request(endpoint.method.into(), &url);
        if !prepared.query.is_empty() {
            req = req.query(&prepared.query);
        }
        if let Some(body) = &prepared.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            tracing::debug!(target: "proxy.plugin", endpoint = endpoint.name, http.status = %status, "proxy request rejected");
            return Err(match serde_json::from_str::<NormalizedError>(&body) {
                Ok(e) => NotionClientError::UnknownHttpResponse { status: status.as_u16(), message: e.message },
                Err(_) => NotionClientError::from_response(status.as_u16(), &body),
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NotionApi for NotionProxyClient {
    async fn retrieve_block(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::BLOCKS_RETRIEVE, args).await
    }

    async fn update_block(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::BLOCKS_UPDATE, args).await
    }

    async fn delete_block(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::BLOCKS_DELETE, args).await
    }

    async fn list_block_children(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::BLOCKS_CHILDREN_LIST, args).await
    }

    async fn append_block_children(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::BLOCKS_CHILDREN_APPEND, args).await
    }

    async fn retrieve_page(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::PAGES_RETRIEVE, args).await
    }

    async fn update_page(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::PAGES_UPDATE, args).await
    }

    async fn retrieve_page_property(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::PAGES_PROPERTIES_RETRIEVE, args).await
    }

    async fn list_users(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::USERS_LIST, args).await
    }

    async fn retrieve_user(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::USERS_RETRIEVE, args).await
    }

    async fn search(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::SEARCH, args).await
    }

    async fn retrieve_database(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::DATABASES_RETRIEVE, args).await
    }

    async fn update_database(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::DATABASES_UPDATE, args).await
    }

    async fn query_database(&self, args: Value) -> Result<Value> {
        self.call(&endpoints::DATABASES_QUERY, args).await
    }
}
