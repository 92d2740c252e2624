//! Integration tests for the infrastructure components
//!
//! These tests verify that PostgreSQL and Redis are reachable, that the
//! embedded migrations apply, and that the schema enforces the record
//! ownership constraint. They need live services:
//!
//! ```text
//! DATABASE_URL=postgresql://... REDIS_URL=redis://... cargo test -- --ignored
//! ```

use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
    error::DatabaseError,
};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;
    // Applying twice must be a no-op
    run_migrations(&pool).await?;

    let row = sqlx::query(
        "SELECT COUNT(*) AS tables FROM information_schema.tables WHERE table_name IN ('users', 'records')",
    )
    .fetch_one(&pool)
    .await?;
    let tables: i64 = row.get("tables");
    assert_eq!(tables, 2, "Migrations did not create the schema");

    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config)?;
    assert!(
        redis_pool.health_check().await?,
        "Redis health check failed"
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_for_unknown_user_is_a_foreign_key_violation()
-> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    run_migrations(&pool).await?;

    let err = sqlx::query("INSERT INTO records (user_id, total_co2) VALUES ($1, $2)")
        .bind(-1_i64)
        .bind(12.5_f64)
        .execute(&pool)
        .await
        .map_err(DatabaseError::from_query)
        .expect_err("insert for a missing user must fail");

    assert!(matches!(err, DatabaseError::ForeignKeyViolation(_)));
    Ok(())
}
