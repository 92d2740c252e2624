//! Emission record model and leaderboard rows

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One stored calculation result
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Record {
    pub id: i64,
    pub user_id: i64,
    pub total_co2: f64,
    pub date: DateTime<Utc>,
}

/// A user's personal best
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub username: String,
    pub min_total_co2: f64,
}
