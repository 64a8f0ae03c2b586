use axum::http::Request;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing_subscriber::{fmt, EnvFilter};

use notion_proxy::cli::{Cli, Command, ModuleArgs, ServeArgs};
use notion_proxy::config::{normalize_api_base, ModuleOptions, ServerConfig};
use notion_proxy::routes;
use notion_proxy::NotionModule;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Routes(args)) => print_routes(&args),
        Some(Command::Serve(args)) => serve(args).await,
        None => serve(ServeArgs::default()).await,
    }
}

async fn health() -> impl IntoResponse {
    "OK"
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let server = ServerConfig::from_env().merge(args.host.clone(), args.port);
    let options = ModuleOptions::defaults_from_env().merge(args.module.overrides());
    tracing::info!(options = ?options, "loaded config");

    let module = NotionModule::setup(options)?;
    let ctx = module.context()?;

    let app = module
        .router(ctx)
        .route("/health", get(health))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO))
                .make_span_with(|req: &Request<_>| {
                    let id = nanoid::nanoid!(8);
                    tracing::info_span!(
                        "http.request",
                        req.id = %id,
                        http.method = %req.method(),
                        http.path = %req.uri().path(),
                        user_agent = req.headers().get("user-agent").and_then(|v| v.to_str().ok()),
                    )
                }),
        );

    let addr = server.addr()?;
    tracing::info!(api_base = %module.public_config().api_base, "notion-proxy listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("notion-proxy stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Does not need a token and never contacts Notion.
fn print_routes(args: &ModuleArgs) -> anyhow::Result<()> {
    let options = ModuleOptions::default().merge(args.overrides());
    let api_base = normalize_api_base(&options.api_base)?;
    for route in routes::mounted_routes(&api_base) {
        println!("{:<6} {} -> {}", route.method.as_str(), route.path, route.handler.operation.name());
    }
    Ok(())
}
