//! Persistence models

pub mod record;
pub mod user;

// Re-export for convenience
pub use record::{LeaderboardEntry, Record};
pub use user::{Credentials, NewUser, User, UserResponse};
