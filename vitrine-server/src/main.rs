//! # Vitrine Server
//!
//! Catalog query service for a museum collection.
//!
//! ## Overview
//!
//! The server exposes:
//!
//! - **Faceted Search**: keyword, image, category, maker, place, facility,
//!   and creation-date facets combined into a single relational query
//! - **Related Items**: attribute-overlap recommendations for items and
//!   people, fanned out concurrently and merged deterministically
//! - **Image Relay**: thumbnail and indexed full-image bytes passed through
//!   from the upstream image host
//! - **Favourites**: per-user favourite items and people behind bearer auth
//!
//! ## Architecture
//!
//! The server is built on Axum and uses PostgreSQL for the catalog store.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_server::{AppState, infra::config::Config, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "vitrine-server")]
#[command(about = "Museum catalog query service")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_file_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let pool = vitrine_core::database::connect(&config.database.url)
        .await
        .context("failed to connect to the catalog store")?;
    info!("connected to catalog store");

    let addr: SocketAddr =
        format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "invalid bind address {}:{}",
                    config.server.host, config.server.port
                )
            })?;

    let state = AppState::new(pool, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
