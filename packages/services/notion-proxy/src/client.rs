use std::sync::Arc;

use notion_client::{NotionApi, NotionClient};

use crate::config::PrivateRuntimeConfig;
use crate::error::ConfigError;

/// Shared, read-only handle to an authenticated Notion session.
pub type ClientHandle = Arc<dyn NotionApi>;

/// Build the Notion client from server-only configuration. Nothing is sent
/// over the network here.
pub fn get_client(config: &PrivateRuntimeConfig) -> Result<ClientHandle, ConfigError> {
    let client = NotionClient::new(config.client_options())?;
    tracing::info!(
        target: "proxy.client",
        base_url = %client.base_url(),
        notion_version = %config.notion_version,
        timeout_ms = config.timeout_ms,
        "notion client ready"
    );
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModuleOptions, RuntimeConfig};

    #[test]
    fn builds_without_network() {
        let cfg = RuntimeConfig::resolve(ModuleOptions { auth: Some("secret_abc".into()), ..ModuleOptions::default() }).unwrap();
        assert!(get_client(&cfg.private).is_ok());
    }

    #[test]
    fn rejects_unusable_version_header() {
        let cfg = RuntimeConfig::resolve(ModuleOptions {
            auth: Some("secret_abc".into()),
            notion_version: "2022-06-28\n".into(),
            ..ModuleOptions::default()
        })
        .unwrap();
        assert!(matches!(get_client(&cfg.private), Err(ConfigError::Client(_))));
    }
}
