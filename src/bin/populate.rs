use anyhow::Context;
use fundingportal::config::Config;
use fundingportal::db;
use fundingportal::jobs::run_populate_sample_data;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing (INFO level)
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = Config::from_env()?;
    let conn = db::connect_and_migrate(&config.database_url, config.db_max_connections)
        .await
        .context("failed to prepare database")?;

    match run_populate_sample_data(&conn).await {
        Ok(summary) => {
            info!(?summary, "populate-sample-data job finished");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "populate-sample-data job failed");
            Err(e.into())
        }
    }
}
