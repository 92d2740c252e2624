//! Common library for the carbon footprint service
//!
//! This crate provides the infrastructure shared by the service: PostgreSQL
//! connectivity and migrations, the Redis client used for sessions, and the
//! storage error type.

pub mod cache;
pub mod database;
pub mod error;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = init_pool(&config).await?;
///     run_migrations(&pool).await?;
///     println!("Database health check: {}", health_check(&pool).await?);
///     Ok(())
/// }
/// ```
pub use database::DatabaseConfig;
