use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::setup_test_db;

/// Test connection with custom configuration
#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    let db = setup_test_db().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 AS test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

/// Migrations are idempotent and reversible
#[tokio::test]
async fn test_migrations_up_down() -> Result<()> {
    let db = setup_test_db().await?;

    // already applied; running again is a no-op
    migration::Migrator::up(&db, None).await?;
    let status = migration::Migrator::get_pending_migrations(&db).await?;
    assert!(status.is_empty());

    migration::Migrator::down(&db, None).await?;
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'persons'".to_string(),
    );
    assert!(db.query_one(stmt).await?.is_none());
    Ok(())
}

/// The color lookup is answered from the color index
#[tokio::test]
async fn test_color_lookup_uses_index() -> Result<()> {
    let db = setup_test_db().await?;
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "EXPLAIN QUERY PLAN SELECT id FROM persons WHERE color_id = 4".to_string(),
    );
    let plan = db.query_all(stmt).await?;
    let details: Vec<String> = plan
        .iter()
        .map(|row| row.try_get::<String>("", "detail"))
        .collect::<Result<_, _>>()?;
    assert!(details.iter().any(|d| d.contains("idx_persons_color_id")), "plan: {details:?}");
    Ok(())
}
