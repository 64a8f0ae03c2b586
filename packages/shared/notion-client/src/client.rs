use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use tracing::Level;

use crate::api::NotionApi;
use crate::endpoints::{self, Endpoint};
use crate::error::{NotionClientError, Result};
use crate::options::ClientOptions;

const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Clone)]
pub struct NotionClient {
    base_url: String,
    http: Client,
}

impl NotionClient {
    /// Build a client. No request is sent until an operation is called.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let version = HeaderValue::from_str(&options.notion_version)
            .map_err(|_| NotionClientError::InvalidArgument(format!("invalid notion version `{}`", options.notion_version)))?;
        headers.insert(NOTION_VERSION_HEADER, version);
        if let Some(auth) = options.auth.as_deref().filter(|a| !a.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", auth.trim()))
                .map_err(|_| NotionClientError::InvalidArgument("auth token contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let user_agent = options
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("notion-client/{}", env!("CARGO_PKG_VERSION")));
        let http = Client::builder()
            .default_headers(headers)
            .timeout(options.timeout())
            .user_agent(user_agent)
            .build()
            .map_err(NotionClientError::Http)?;

        Ok(Self { base_url: options.base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn truncate_body(body: &str) -> (String, bool) {
        const LIMIT: usize = 2_000;
        if body.len() > LIMIT {
            let cut = (0..=LIMIT).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
            (format!("{}…<truncated {} chars>", &body[..cut], body.len() - cut), true)
        } else {
            (body.to_string(), false)
        }
    }

    /// Send one request described by `endpoint` with the given argument object.
    pub async fn request(&self, endpoint: &Endpoint, args: Value) -> Result<Value> {
        let prepared = endpoint.prepare(args)?;
        let url = format!("{}/v1/{}", self.base_url, prepared.path);

        let mut req = self.http.request(endpoint.method.into(), &url);
        if !prepared.query.is_empty() {
            req = req.query(&prepared.query);
        }
        if let Some(body) = &prepared.body {
            req = req.json(body);
        }

        tracing::debug!(target: "notion.api", endpoint = endpoint.name, http.method = endpoint.method.as_str(), http.path = %prepared.path, "sending request");
        let started = std::time::Instant::now();
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = NotionClientError::from(e);
                tracing::event!(target: "notion.api", Level::ERROR, endpoint = endpoint.name, error = %err, "notion request failed");
                return Err(err);
            }
        };
        let status = resp.status();
        let body = resp.text().await?;
        let took_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let err = NotionClientError::from_response(status.as_u16(), &body);
            let (preview, truncated) = Self::truncate_body(&body);
            tracing::event!(
                target: "notion.api",
                Level::WARN,
                endpoint = endpoint.name,
                http.status = %status,
                took.ms = took_ms,
                error.code = ?err.code().map(|c| c.as_str()),
                body.truncated = truncated,
                body.preview = %preview,
                "notion request rejected"
            );
            return Err(err);
        }

        tracing::debug!(target: "notion.api", endpoint = endpoint.name, http.status = %status, took.ms = took_ms, "notion request ok");
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn retrieve_block(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::BLOCKS_RETRIEVE, args).await
    }

    async fn update_block(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::BLOCKS_UPDATE, args).await
    }

    async fn delete_block(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::BLOCKS_DELETE, args).await
    }

    async fn list_block_children(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::BLOCKS_CHILDREN_LIST, args).await
    }

    async fn append_block_children(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::BLOCKS_CHILDREN_APPEND, args).await
    }

    async fn retrieve_page(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::PAGES_RETRIEVE, args).await
    }

    async fn update_page(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::PAGES_UPDATE, args).await
    }

    async fn retrieve_page_property(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::PAGES_PROPERTIES_RETRIEVE, args).await
    }

    async fn list_users(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::USERS_LIST, args).await
    }

    async fn retrieve_user(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::USERS_RETRIEVE, args).await
    }

    async fn search(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::SEARCH, args).await
    }

    async fn retrieve_database(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::DATABASES_RETRIEVE, args).await
    }

    async fn update_database(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::DATABASES_UPDATE, args).await
    }

    async fn query_database(&self, args: Value) -> Result<Value> {
        self.request(&endpoints::DATABASES_QUERY, args).await
    }
}
