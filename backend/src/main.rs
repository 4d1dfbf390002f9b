use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use firstline::config::Config;
use firstline::services::OpenAIClient;
use firstline::utils::{init_logging, with_bootstrap_logging};
use firstline::{AppState, build_router};

/// FirstLine - cold email openers that sound human
#[derive(Debug, Parser)]
#[command(name = "firstline", version, about)]
struct Args {
    /// Path to config.toml (default: conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env.local wins over .env; neither overrides the real environment
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // The configured subscriber needs the config, so loading logs to the console
    let mut config = with_bootstrap_logging(|| Config::load(args.config.as_deref()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guard = init_logging(&config.logging);

    tracing::info!("Starting FirstLine v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Completion endpoint: {} (model: {})", config.ai.base_url, config.ai.model);
    if config.ai.api_key.is_none() {
        tracing::warn!("AI_API_KEY is not set; /api/generate will answer 500 until it is");
    }

    let client = OpenAIClient::new(&config.ai);
    let state = Arc::new(AppState::new(Arc::new(client)));

    let web_root = if config.static_config.enabled {
        if Path::new(&config.static_config.web_root).is_dir() {
            tracing::info!("Serving static files from {}", config.static_config.web_root);
            Some(config.static_config.web_root.as_str())
        } else {
            tracing::warn!(
                "Static web root '{}' not found, static files disabled",
                config.static_config.web_root
            );
            None
        }
    } else {
        None
    };

    let app = build_router(state, web_root);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
