//! # Notion Client
//!
//! A small async client for the Notion REST API. The Notion proxy service
//! forwards its routes through it.
//!
//! ## Features
//!
//! - **Opaque arguments**: every operation takes the JSON argument object the
//!   Notion API documents and returns the response JSON untouched
//! - **Endpoint table**: path, query and body parameters are split per
//!   operation from a single argument object
//! - **Typed errors**: Notion error responses, unknown HTTP failures and
//!   timeouts are distinguishable from transport problems
//! - **Trait seam**: services depend on [`NotionApi`], so handlers can run
//!   against a stub or a proxying client
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notion_client::{ClientOptions, NotionApi, NotionClient};
//! use serde_json::json;
//!
//! # async fn run() -> notion_client::Result<()> {
//! let client = NotionClient::new(ClientOptions::with_auth("secret_xxx"))?;
//! let page = client.retrieve_page(json!({ "page_id": "b55c9c91" })).await?;
//! println!("{}", page["url"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod options;

// Re-export main types for easy access
pub use api::NotionApi;
pub use client::NotionClient;
pub use endpoints::{Endpoint, Method, PreparedRequest};
pub use error::{ApiErrorCode, NotionClientError, Result};
pub use options::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION, DEFAULT_TIMEOUT_MS};
