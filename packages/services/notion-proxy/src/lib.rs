//! Notion proxy service.
//!
//! Exposes a fixed set of Notion API operations as HTTP routes under a
//! configurable prefix. Each route forwards its path parameters and body (or
//! query string) to one call of a shared [`notion_client::NotionApi`] handle
//! and answers with the Notion response, or a `{statusCode, message}` error.

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod module;
pub mod plugin;
pub mod routes;

pub use config::{ModuleOptions, ModuleOptionsOverride, PrivateRuntimeConfig, PublicRuntimeConfig, RuntimeConfig, ServerConfig};
pub use context::{NotionContext, ServerUtils};
pub use error::{map_error, ConfigError, NormalizedError};
pub use module::NotionModule;
pub use plugin::{ClientPlugin, NotionProxyClient};
pub use routes::{HttpMethod, RouteDescriptor};
