//! Session management using Redis

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SameSite};
use common::cache::RedisPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::jwt::{Claims, JwtService};

/// How the session token travels to the browser
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

/// Session manager for handling user sessions in Redis
#[derive(Clone)]
pub struct SessionManager {
    redis_pool: RedisPool,
    jwt_service: JwtService,
    cookie: CookieSettings,
}

fn session_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(redis_pool: RedisPool, jwt_service: JwtService, cookie: CookieSettings) -> Self {
        Self {
            redis_pool,
            jwt_service,
            cookie,
        }
    }

    /// Start a session for a user and return its signed token
    pub async fn create_session(&self, user_id: i64) -> Result<String> {
        let (token, claims) = self.jwt_service.generate_token(user_id)?;
        info!(user_id, session_id = %claims.sid, "Creating session");

        self.redis_pool
            .set(
                &session_key(claims.sid),
                &user_id.to_string(),
                Some(self.jwt_service.ttl_seconds()),
            )
            .await?;

        Ok(token)
    }

    /// Resolve a token to its claims if the token is valid and its session is still live.
    ///
    /// Returns `Ok(None)` for forged, expired or logged-out tokens; `Err` only
    /// when the session store itself fails.
    pub async fn resolve(&self, token: &str) -> Result<Option<Claims>> {
        let claims = match self.jwt_service.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Rejected session token: {}", e);
                return Ok(None);
            }
        };

        let stored = self.redis_pool.get(&session_key(claims.sid)).await?;
        match stored {
            Some(user_id) if user_id == claims.sub.to_string() => Ok(Some(claims)),
            _ => Ok(None),
        }
    }

    /// End a session
    pub async fn delete_session(&self, session_id: Uuid) -> Result<()> {
        info!(session_id = %session_id, "Deleting session");
        self.redis_pool.delete(&session_key(session_id)).await
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }

    /// Cookie carrying a freshly issued token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie.name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.cookie.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie that makes the browser drop the session token
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.cookie.name.clone()).path("/").build()
    }

    /// Get Redis health status
    pub async fn health_check(&self) -> Result<bool> {
        self.redis_pool.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::cache::RedisConfig;

    fn manager(url: &str) -> SessionManager {
        let redis_pool = RedisPool::new(&RedisConfig {
            url: url.to_string(),
        })
        .unwrap();
        SessionManager::new(
            redis_pool,
            JwtService::new("test-secret", 60).unwrap(),
            CookieSettings {
                name: "carbon_session".to_string(),
                secure: true,
            },
        )
    }

    #[test]
    fn test_session_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            session_key(id),
            "session:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_session_cookie_attributes() {
        let sessions = manager("redis://127.0.0.1:1");
        let cookie = sessions.session_cookie("token".to_string());

        assert_eq!(cookie.name(), "carbon_session");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[tokio::test]
    async fn test_invalid_token_resolves_without_touching_redis() {
        // Nothing listens on this port; a lookup would fail with Err
        let sessions = manager("redis://127.0.0.1:1");
        assert!(sessions.resolve("garbage").await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires a running Redis at redis://localhost:6379"]
    async fn test_session_lifecycle() -> Result<()> {
        let sessions = manager("redis://localhost:6379");

        let token = sessions.create_session(5).await?;
        let claims = sessions.resolve(&token).await?.expect("live session");
        assert_eq!(claims.sub, 5);

        sessions.delete_session(claims.sid).await?;
        assert!(sessions.resolve(&token).await?.is_none());
        Ok(())
    }
}
