//! Startup registration of the notion module.
//!
//! [`NotionModule::setup`] runs once: it merges options over the defaults,
//! splits the result into public and private runtime config, mounts the
//! route table under the api base and prepares the client-side plugin.

use axum::Router;

use crate::client;
use crate::config::{ModuleOptions, PrivateRuntimeConfig, PublicRuntimeConfig, RuntimeConfig};
use crate::context::NotionContext;
use crate::error::ConfigError;
use crate::plugin::ClientPlugin;
use crate::routes::{self, RouteDescriptor};

pub const NAME: &str = "notion-proxy";
pub const CONFIG_KEY: &str = "notion";

#[derive(Debug, Clone)]
pub struct NotionModule {
    config: RuntimeConfig,
    routes: Vec<RouteDescriptor>,
    plugin: ClientPlugin,
}

impl NotionModule {
    pub fn setup(options: ModuleOptions) -> Result<Self, ConfigError> {
        let config = RuntimeConfig::resolve(options)?;
        let routes = routes::mounted_routes(&config.public.api_base);
        let plugin = ClientPlugin::new(config.public.clone());

        tracing::info!(
            module = NAME,
            config_key = CONFIG_KEY,
            api_base = %config.public.api_base,
            routes = routes.len(),
            database_configured = config.private.db.is_some(),
            "module registered"
        );

        Ok(Self { config, routes, plugin })
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn public_config(&self) -> &PublicRuntimeConfig {
        &self.config.public
    }

    pub fn private_config(&self) -> &PrivateRuntimeConfig {
        &self.config.private
    }

    pub fn client_plugin(&self) -> &ClientPlugin {
        &self.plugin
    }

    /// Build the shared request context. Called once per process.
    pub fn context(&self) -> Result<NotionContext, ConfigError> {
        Ok(NotionContext::new(client::get_client(&self.config.private)?))
    }

    /// The proxy router with `ctx` as state.
    pub fn router(&self, ctx: NotionContext) -> Router {
        routes::build_router(&self.routes).with_state(ctx)
    }
}
