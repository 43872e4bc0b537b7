//! trellis API server
//!
//! Serves the user GraphQL API and the Relay `node` lookup over HTTP.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trellis_api::{api, config, db::Database, graphql, registry::Registry, state::AppState};
use trellis_id::PrefixRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::from_env()?;

    // RUST_LOG wins over the configured log level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(app_env = ?config.app_env, "Starting trellis API server");
    info!(listen_addr = %config.listen_addr, "Configuration loaded");

    let db = match Database::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    if config.run_migrations {
        if let Err(e) = db.run_migrations().await {
            error!(error = %e, "Failed to run migrations");
            return Err(e.into());
        }
    }

    let ids = Arc::new(PrefixRegistry::new());
    for (prefix, entity) in ids.iter() {
        info!(prefix, entity = entity.type_name(), table = entity.table_name(), "Registered id prefix");
    }

    let controller = Registry::new(&db).new_controller();
    let schema = graphql::build_schema(Arc::new(controller), ids);

    let app = api::create_router(AppState::new(db, schema));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Received shutdown signal");
        })
        .await?;

    info!("API server shutdown complete");
    Ok(())
}
