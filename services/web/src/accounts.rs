//! Registration and login

use std::net::IpAddr;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{NewUser, User},
    rate_limiter::RateLimiter,
    repositories::UserRepository,
};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC hash string
pub fn verify_password(password_hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Failed to parse password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create an account. A taken username fails with [`AppError::DuplicateUser`]
/// and leaves the users table untouched.
pub async fn register(users: &UserRepository, username: &str, password: &str) -> AppResult<User> {
    if users.find_by_username(username).await?.is_some() {
        return Err(AppError::DuplicateUser(username.to_string()));
    }

    let new_user = NewUser {
        username: username.to_string(),
        password_hash: hash_password(password)?,
    };

    // A concurrent registration can still win the race; the unique index decides
    match users.create(&new_user).await {
        Ok(user) => {
            info!(user_id = user.id, "Registered user {}", user.username);
            Ok(user)
        }
        Err(e) if e.is_unique_violation() => Err(AppError::DuplicateUser(username.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Check a username/password pair.
///
/// Unknown users and wrong passwords fail identically with
/// [`AppError::Authentication`]. Wrong passwords for existing accounts count
/// towards the limit for this username and `client`.
pub async fn authenticate(
    users: &UserRepository,
    rate_limiter: &RateLimiter,
    username: &str,
    password: &str,
    client: Option<IpAddr>,
) -> AppResult<User> {
    let limiter_key = RateLimiter::login_key(username, client);
    if !rate_limiter.check(&limiter_key).await {
        warn!("Login rate limit hit for {}", limiter_key);
        return Err(AppError::TooManyAttempts);
    }

    let user = users
        .find_by_username(username)
        .await?
        .ok_or(AppError::Authentication)?;

    if !verify_password(&user.password_hash, password)? {
        rate_limiter.record_failure(&limiter_key).await;
        return Err(AppError::Authentication);
    }

    rate_limiter.reset(&limiter_key).await;
    info!(user_id = user.id, "User logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limiter::RateLimiterConfig;
    use common::database::{DatabaseConfig, init_pool, run_migrations};
    use serial_test::serial;
    use std::net::Ipv4Addr;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "battery staple").unwrap());
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_internal_error() {
        assert!(matches!(
            verify_password("not-a-phc-string", "x"),
            Err(AppError::Internal(_))
        ));
    }

    async fn repository() -> UserRepository {
        let pool = init_pool(&DatabaseConfig::from_env().unwrap()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        UserRepository::new(pool)
    }

    fn unique_name(prefix: &str) -> String {
        format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    #[serial(postgres)]
    async fn test_duplicate_registration_is_rejected() {
        let users = repository().await;
        let username = unique_name("dup");

        let first = register(&users, &username, "pw-one").await.unwrap();
        let second = register(&users, &username, "pw-two").await;
        assert!(matches!(second, Err(AppError::DuplicateUser(_))));

        // The first row and its password are untouched
        let stored = users.find_by_username(&username).await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert!(verify_password(&stored.password_hash, "pw-one").unwrap());
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    #[serial(postgres)]
    async fn test_wrong_password_fails_authentication() {
        let users = repository().await;
        let limiter = RateLimiter::new(RateLimiterConfig::default());
        let username = unique_name("login");
        register(&users, &username, "right").await.unwrap();

        let wrong = authenticate(&users, &limiter, &username, "wrong", None).await;
        assert!(matches!(wrong, Err(AppError::Authentication)));

        let unknown = authenticate(&users, &limiter, &unique_name("ghost"), "right", None).await;
        assert!(matches!(unknown, Err(AppError::Authentication)));

        let user = authenticate(&users, &limiter, &username, "right", None)
            .await
            .unwrap();
        assert_eq!(user.username, username);
        assert_eq!(limiter.entry_count().await, 0);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    #[serial(postgres)]
    async fn test_unknown_usernames_leave_no_limiter_entries() {
        let users = repository().await;
        let limiter = RateLimiter::new(RateLimiterConfig::default());

        for _ in 0..50 {
            let attempt = authenticate(&users, &limiter, &unique_name("ghost"), "pw", None).await;
            assert!(matches!(attempt, Err(AppError::Authentication)));
        }
        assert_eq!(limiter.entry_count().await, 0);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    #[serial(postgres)]
    async fn test_repeated_failures_are_rate_limited_per_client() {
        let users = repository().await;
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_attempts: 2,
            window_seconds: 60,
            ban_duration_seconds: 60,
        });
        let username = unique_name("brute");
        register(&users, &username, "right").await.unwrap();
        let attacker = Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        let owner = Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)));

        for _ in 0..2 {
            let attempt = authenticate(&users, &limiter, &username, "wrong", attacker).await;
            assert!(matches!(attempt, Err(AppError::Authentication)));
        }
        let blocked = authenticate(&users, &limiter, &username, "right", attacker).await;
        assert!(matches!(blocked, Err(AppError::TooManyAttempts)));

        // The account owner on another address is not locked out
        let user = authenticate(&users, &limiter, &username, "right", owner)
            .await
            .unwrap();
        assert_eq!(user.username, username);
    }
}
