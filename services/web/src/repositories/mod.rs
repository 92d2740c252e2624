//! Repositories for database operations

pub mod record;
pub mod user;

pub use record::RecordRepository;
pub use user::UserRepository;
