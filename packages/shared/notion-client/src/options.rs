use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Options used to build a [`NotionClient`](crate::NotionClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Integration token sent as `Authorization: Bearer <auth>`.
    pub auth: Option<String>,
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub notion_version: String,
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auth: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

impl ClientOptions {
    pub fn with_auth(auth: impl Into<String>) -> Self {
        Self { auth: Some(auth.into()), ..Self::default() }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// The token must never end up in logs.
impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("auth", &self.auth.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("notion_version", &self.notion_version)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_auth() {
        let opts = ClientOptions::with_auth("secret_abc");
        let dbg = format!("{:?}", opts);
        assert!(!dbg.contains("secret_abc"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn defaults_follow_notion_sdk() {
        let opts = ClientOptions::default();
        assert_eq!(opts.base_url, "https://api.notion.com");
        assert_eq!(opts.notion_version, "2022-06-28");
        assert_eq!(opts.timeout(), Duration::from_secs(60));
        assert!(opts.auth.is_none());
    }
}
