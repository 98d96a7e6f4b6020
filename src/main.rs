use std::env;
use std::sync::Arc;

use anyhow::Result;
use log::info;
use tokio::{net::TcpListener, signal};

mod cache;
mod cli;
mod server;

use cache::Cache;
use server::AppState;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "tmc_events=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let cache = Cache::new(cache::Config {
        enabled: args.enable_cache,
        ttl: args.cache_ttl,
    });

    let router = server::router(Arc::new(AppState {
        source: args.source,
        cache,
    }));

    let listener = TcpListener::bind(args.address).await?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
