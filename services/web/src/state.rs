//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    rate_limiter::RateLimiter,
    repositories::{RecordRepository, UserRepository},
    session::SessionManager,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub record_repository: RecordRepository,
    pub session_manager: SessionManager,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(db_pool: PgPool, session_manager: SessionManager, rate_limiter: RateLimiter) -> Self {
        Self {
            user_repository: UserRepository::new(db_pool.clone()),
            record_repository: RecordRepository::new(db_pool.clone()),
            db_pool,
            session_manager,
            rate_limiter,
        }
    }
}
