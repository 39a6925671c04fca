//! Tutorial server: reads configuration from the environment, connects the store and serves the API.
//!
//! Run from repo root: `cargo run -p tutorial-server`

use std::process::ExitCode;
use tokio::net::TcpListener;
use tutorial_service::{app, AppState, MemoryTutorialStore, PgTutorialStore, ServiceConfig, StoreKind};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("tutorial_service=info,tutorial_server=info,tower_http=info")
            }),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;

    let state = match config.store {
        StoreKind::Postgres => {
            // The server does not start without its store.
            let store = PgTutorialStore::connect(&config).await.map_err(|e| {
                tracing::error!(error = %e, "cannot connect to the database");
                e
            })?;
            tracing::info!(schema = %config.schema, "connected to the database");
            AppState::new(store)
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory tutorial store; data is lost on restart");
            AppState::new(MemoryTutorialStore::new())
        }
    };

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
