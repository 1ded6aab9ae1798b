//! Template API server: reads config from env, picks a store, serves the router.

use std::sync::Arc;
use template_api::config::DEFAULT_LOG_FILTER;
use template_api::{
    app, ensure_database_exists, ensure_template_table, AppConfig, AppState, MemoryTemplateStore, PgTemplateStore,
    TemplateStore,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let store: Arc<dyn TemplateStore> = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_template_table(&pool).await?;
            tracing::info!(max_connections = config.max_connections, "using postgres template store");
            Arc::new(PgTemplateStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; templates are kept in memory and lost on exit");
            Arc::new(MemoryTemplateStore::new())
        }
    };

    let router = app(AppState::new(store), &config);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
