//! Command line interface of the `notion-proxy` binary.

use clap::{Args, Parser, Subcommand};

use crate::config::ModuleOptionsOverride;

#[derive(Debug, Parser)]
#[command(name = "notion-proxy")]
#[command(about = "HTTP proxy in front of the Notion API", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the proxy routes (default)
    Serve(ServeArgs),
    /// Print the route table and exit
    Routes(ModuleArgs),
}

/// Overrides for the notion module options. Unset flags keep the
/// environment-derived defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ModuleArgs {
    /// Notion integration token (defaults to NOTION_API_KEY)
    #[arg(long)]
    pub auth: Option<String>,
    /// Default database id (defaults to NOTION_DATABASE_ID)
    #[arg(long)]
    pub db: Option<String>,
    /// Route prefix for all proxy endpoints
    #[arg(long)]
    pub api_base: Option<String>,
    #[arg(long)]
    pub notion_version: Option<String>,
    /// Notion API origin, e.g. a local mock
    #[arg(long)]
    pub notion_base_url: Option<String>,
    /// Per-request timeout towards Notion
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl ModuleArgs {
    pub fn overrides(&self) -> ModuleOptionsOverride {
        ModuleOptionsOverride {
            auth: self.auth.clone(),
            db: self.db.clone(),
            api_base: self.api_base.clone(),
            notion_version: self.notion_version.clone(),
            base_url: self.notion_base_url.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Listen address (defaults to HOST or 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,
    /// Listen port (defaults to PORT or 8087)
    #[arg(long)]
    pub port: Option<u16>,
    #[command(flatten)]
    pub module: ModuleArgs,
}
