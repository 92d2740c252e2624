use std::net::SocketAddr;

use anyhow::Result;
use common::{cache, database};
use tokio::net::TcpListener;
use tracing::{info, warn};

mod accounts;
mod config;
mod error;
mod jwt;
mod logging;
mod middleware;
mod models;
mod rate_limiter;
mod repositories;
mod routes;
mod session;
mod state;
mod validation;
mod views;

use crate::{
    config::AppConfig,
    jwt::JwtService,
    rate_limiter::{RateLimiter, RateLimiterConfig},
    session::{CookieSettings, SessionManager},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(&config.logging)?;

    info!("Starting carbon footprint service");

    if config.uses_default_secret() {
        warn!("Using the default session secret; set CARBON_SESSION__SECRET_KEY in production");
    }

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool).await?;

    // Initialize Redis connection pool
    let redis_config = cache::RedisConfig::from_env()?;
    let redis_pool = cache::RedisPool::new(&redis_config)?;

    let jwt_service = JwtService::new(&config.session.secret_key, config.session.ttl_seconds)?;
    let session_manager = SessionManager::new(
        redis_pool,
        jwt_service,
        CookieSettings {
            name: config.session.cookie_name.clone(),
            secure: config.session.secure_cookie,
        },
    );
    let rate_limiter = RateLimiter::new(RateLimiterConfig::default());

    let app = routes::create_router(AppState::new(pool, session_manager, rate_limiter));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Carbon footprint service listening on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Carbon footprint service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
