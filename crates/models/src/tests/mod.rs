/// Connection helpers and migrator tests
pub mod db_tests;

/// CRUD operations on the `persons` entity
pub mod person_tests;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
