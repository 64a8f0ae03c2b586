use std::env;
use std::fmt;
use std::net::SocketAddr;

use notion_client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION, DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "/api/notion";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8087;

/// Options of the notion module (the `notion` config key).
#[derive(Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    pub auth: Option<String>,
    pub db: Option<String>,
    /// Route prefix every proxy endpoint is mounted under.
    pub api_base: String,
    pub notion_version: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self {
            auth: None,
            db: None,
            api_base: DEFAULT_API_BASE.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ModuleOptions {
    /// Module defaults, with `auth` and `db` taken from `NOTION_API_KEY` and
    /// `NOTION_DATABASE_ID`.
    pub fn defaults_from_env() -> Self {
        let get = |k: &str| env::var(k).ok().filter(|v| !v.trim().is_empty());
        Self { auth: get("NOTION_API_KEY"), db: get("NOTION_DATABASE_ID"), ..Self::default() }
    }

    /// Apply caller overrides on top of these options. Every field set in
    /// `overrides` wins; unset fields keep the current value.
    pub fn merge(self, overrides: ModuleOptionsOverride) -> Self {
        Self {
            auth: overrides.auth.or(self.auth),
            db: overrides.db.or(self.db),
            api_base: overrides.api_base.unwrap_or(self.api_base),
            notion_version: overrides.notion_version.unwrap_or(self.notion_version),
            base_url: overrides.base_url.unwrap_or(self.base_url),
            timeout_ms: overrides.timeout_ms.unwrap_or(self.timeout_ms),
        }
    }
}

impl fmt::Debug for ModuleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleOptions")
            .field("auth", &self.auth.as_ref().map(|_| "<redacted>"))
            .field("db", &self.db)
            .field("api_base", &self.api_base)
            .field("notion_version", &self.notion_version)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Caller-supplied option overrides; `None` means "keep the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptionsOverride {
    pub auth: Option<String>,
    pub db: Option<String>,
    pub api_base: Option<String>,
    pub notion_version: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Configuration visible to client-side code. Never holds secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRuntimeConfig {
    pub api_base: String,
}

/// Server-only configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateRuntimeConfig {
    pub auth: String,
    /// Default database id for server-side consumers. No handler reads it;
    /// routes always take the database id from the path.
    pub db: Option<String>,
    pub notion_version: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl PrivateRuntimeConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            auth: Some(self.auth.clone()),
            base_url: self.base_url.clone(),
            notion_version: self.notion_version.clone(),
            timeout_ms: self.timeout_ms,
            user_agent: Some(format!("notion-proxy/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl fmt::Debug for PrivateRuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateRuntimeConfig")
            .field("auth", &"<redacted>")
            .field("db", &self.db)
            .field("notion_version", &self.notion_version)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Resolved configuration, split by trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub public: PublicRuntimeConfig,
    pub private: PrivateRuntimeConfig,
}

impl RuntimeConfig {
    /// Validate merged options. A missing auth token is rejected here so the
    /// service never starts without credentials.
    pub fn resolve(options: ModuleOptions) -> Result<Self, ConfigError> {
        let api_base = normalize_api_base(&options.api_base)?;
        let auth = options
            .auth
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or(ConfigError::MissingAuthToken)?;
        let base_url = options.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(options.base_url));
        }
        if options.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        let db = options.db.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());

        Ok(Self {
            public: PublicRuntimeConfig { api_base },
            private: PrivateRuntimeConfig {
                auth,
                db,
                notion_version: options.notion_version,
                base_url,
                timeout_ms: options.timeout_ms,
            },
        })
    }
}

/// Normalize a route prefix to `/segment/...` without a trailing slash.
/// `""` and `"/"` mount the routes at the root and normalize to `""`.
pub fn normalize_api_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let invalid = trimmed.split('/').any(|seg| {
        seg.is_empty() || seg.starts_with(':') || seg.contains(|c: char| matches!(c, '{' | '}' | '*' | '?' | '#') || c.is_whitespace())
    });
    if invalid {
        return Err(ConfigError::InvalidApiBase(raw.to_string()));
    }
    Ok(format!("/{}", trimmed))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let get = |k: &str| env::var(k).ok();
        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = get("PORT").and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }

    pub fn merge(self, host: Option<String>, port: Option<u16>) -> Self {
        Self { host: host.unwrap_or(self.host), port: port.unwrap_or(self.port) }
    }

    /// `host` must be an IP literal.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(format!("{}:{}", self.host, self.port)))
    }
}
