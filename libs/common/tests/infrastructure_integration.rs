//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL document store is reachable and
//! that the embedded migrations produce the expected tables. They need a
//! running database (see `DATABASE_URL`) and are ignored by default.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;
    // Migrations are idempotent
    run_migrations(&pool).await?;

    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS tables
        FROM information_schema.tables
        WHERE table_name IN ('users', 'exam_folders')
        "#,
    )
    .fetch_one(&pool)
    .await?;

    let tables: i64 = row.get("tables");
    assert_eq!(tables, 2, "Expected users and exam_folders tables");

    Ok(())
}
