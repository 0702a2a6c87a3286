#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database per test, migrated to the latest schema.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // one pooled connection, otherwise each connection opens its own empty database
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout_secs: 10,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
