use crate::modules::handlers::{home, webhook, SharedHandler};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use contest_bot_libs::{BotConfig, Dispatcher, MessageHandler};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let config = BotConfig::from_env().with_context(|| {
        let message = "invalid bot configuration.";
        tracing::error!(message);
        message
    })?;

    tracing::info!(
        "Contests will be fetched from {} (timeout {:?}, timezone {})",
        config.api_url,
        config.fetch_timeout,
        config.timezone
    );
    let dispatcher = Dispatcher::from_config(config).with_context(|| {
        let message = "couldn't create HTTP client for Codeforces API.";
        tracing::error!(message);
        message
    })?;

    let app = create_router(dispatcher);
    let port = resolve_port(args.port)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| {
            let message = format!("server at port {} terminated abnormally", port);
            tracing::error!(message);
            message
        })?;

    Ok(())
}

fn resolve_port(port: Option<u16>) -> Result<u16> {
    if let Some(port) = port {
        return Ok(port);
    }

    match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .with_context(|| format!("PORT must be a port number but got `{}`", port)),
        Err(_) => {
            tracing::warn!(
                "PORT environment variable is not set. Default port number {} will be used.",
                DEFAULT_PORT
            );
            Ok(DEFAULT_PORT)
        }
    }
}

pub fn create_router(handler: impl MessageHandler + Send + Sync + 'static) -> Router {
    let handler: SharedHandler = Arc::new(handler);

    Router::new()
        .route("/", routing::get(home))
        .route("/webhook", routing::post(webhook))
        .layer(Extension(handler))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("SIGINT signal received, starting graceful shutdown.");
}
