use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Opens the connection pool. In-memory SQLite is pinned to a single
/// connection, otherwise every pooled connection would see its own database.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let in_memory = database_url.starts_with("sqlite") && database_url.contains(":memory:");

    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(if in_memory { 1 } else { max_connections })
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    tracing::info!(
        backend = if database_url.starts_with("postgres") { "postgres" } else { "sqlite" },
        "connecting to database"
    );

    Database::connect(options).await
}

/// Applies all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

pub async fn connect_and_migrate(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url, max_connections).await?;
    migrate(&db).await?;
    Ok(db)
}
