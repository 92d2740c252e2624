//! Authentication middleware for session token validation

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Authenticated caller, inserted into request extensions by [`auth_middleware`]
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
    pub session_id: Uuid,
}

/// Reject requests without a live session; otherwise expose the caller as [`AuthUser`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar, req.headers(), state.session_manager.cookie_name())
        .ok_or(AppError::Unauthorized)?;

    let claims = state
        .session_manager
        .resolve(&token)
        .await
        .map_err(|e| {
            error!("Failed to look up session: {}", e);
            AppError::Internal("session store unavailable".to_string())
        })?
        .ok_or(AppError::Unauthorized)?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        session_id: claims.sid,
    });

    Ok(next.run(req).await)
}

/// Session cookie first, then an `Authorization: Bearer` header
fn session_token(jar: &CookieJar, headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
