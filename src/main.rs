#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::storage::Config as StorageConfig;
use crate::storage::Memory;
use crate::storage::Postgres;
use crate::storage::Storage;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

mod api;
mod graceful_shutdown;
mod notes;
mod password;
mod storage;
mod tasks;
#[cfg(test)]
mod tests;
mod users;
mod utils;

const DEFAULT_RUST_LOG: &str = "taskpad=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:1000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app(StorageConfig::from_env()?).await?;

    let address = setup_address()?;
    tracing::info!("Listening on {}", address);

    let listener = TcpListener::bind(address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its storage
///
/// # Errors
///
/// Will return `Err` if the storage fails to load:
/// - Database connection
/// - Migrations
pub async fn setup_app(config: StorageConfig) -> Result<Router> {
    let router = match config {
        StorageConfig::Postgres(options) => {
            tracing::info!("Using Postgres storage");

            create_router(Postgres::connect(options).await?)
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage, everything is gone on shutdown");

            create_router(Memory::new())
        }
    };

    Ok(router)
}

/// Create the router for the storage
fn create_router<S: Storage>(storage: S) -> Router {
    Router::new()
        .merge(router::<S>())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(Extension(storage))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(env_var_or_else("RUST_LOG", || {
            DEFAULT_RUST_LOG.into()
        })))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Some(port) = env_var("PORT") {
        let port = port.parse::<u16>()?;

        address.set_port(port);
    }

    Ok(address)
}
