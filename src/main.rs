use anyhow::Context;
use fundingportal::config::Config;
use fundingportal::service::CatalogService;
use fundingportal::{create_app, db, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let conn = db::connect_and_migrate(&config.database_url, config.db_max_connections)
        .await
        .context("failed to prepare database")?;

    if !config.demo_fallback {
        tracing::info!("demo fallback disabled; empty results are returned as-is");
    }

    let catalog = CatalogService::new(conn).with_demo_fallback(config.demo_fallback);
    let bind_addr = config.bind_addr;
    let app = create_app(AppState::new(catalog, config));

    // Run our server
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
