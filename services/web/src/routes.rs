//! HTTP routes of the carbon footprint service

use axum::{
    Extension, Form, Json, Router,
    extract::{ConnectInfo, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use footprint::{RawInput, advise, compute};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    accounts,
    error::{AppError, AppResult},
    middleware::{AuthUser, auth_middleware},
    models::{Credentials, UserResponse},
    state::AppState,
    validation::validate_credentials,
    views::{CalculationView, FormView, HistoryView, LandingView, LeaderboardView},
};

/// Number of users shown on the leaderboard
pub const LEADERBOARD_SIZE: i64 = 5;
/// Number of records returned by `/history`
pub const HISTORY_LIMIT: i64 = 50;

/// Create the router for the service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/logout", get(logout))
        .route("/calculator", get(calculator))
        .route("/calculate", get(calculate_form_redirect).post(calculate))
        .route("/leaderboard", get(leaderboard))
        .route("/history", get(history))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Landing page
pub async fn index() -> impl IntoResponse {
    Json(LandingView::new())
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);
    let sessions = state
        .session_manager
        .health_check()
        .await
        .unwrap_or_else(|e| {
            error!("Session store health check failed: {}", e);
            false
        });

    let status = if database && sessions {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ok" } else { "degraded" },
            "service": "carbon-footprint",
            "database": database,
            "sessions": sessions,
        })),
    )
}

pub async fn register_form() -> impl IntoResponse {
    Json(FormView::register())
}

/// Create an account and sign it in
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> AppResult<(CookieJar, Redirect)> {
    let (username, password) = validate_credentials(&credentials).map_err(AppError::BadRequest)?;

    let user = accounts::register(&state.user_repository, &username, &password).await?;
    let jar = start_session(&state, jar, user.id).await?;

    Ok((jar, Redirect::to("/calculator")))
}

pub async fn login_form() -> impl IntoResponse {
    Json(FormView::login())
}

/// Authenticate and start a session
pub async fn login(
    State(state): State<AppState>,
    client: Option<ConnectInfo<SocketAddr>>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> AppResult<(CookieJar, Redirect)> {
    let (username, password) = validate_credentials(&credentials).map_err(AppError::BadRequest)?;

    let user = accounts::authenticate(
        &state.user_repository,
        &state.rate_limiter,
        &username,
        &password,
        client.map(|ConnectInfo(addr)| addr.ip()),
    )
    .await?;
    let jar = start_session(&state, jar, user.id).await?;

    Ok((jar, Redirect::to("/calculator")))
}

async fn start_session(state: &AppState, jar: CookieJar, user_id: i64) -> AppResult<CookieJar> {
    let token = state
        .session_manager
        .create_session(user_id)
        .await
        .map_err(|e| {
            error!("Failed to create session: {}", e);
            AppError::Internal("failed to create session".to_string())
        })?;

    Ok(jar.add(state.session_manager.session_cookie(token)))
}

/// End the current session
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    state
        .session_manager
        .delete_session(user.session_id)
        .await
        .map_err(|e| {
            error!("Failed to delete session: {}", e);
            AppError::Internal("failed to delete session".to_string())
        })?;

    info!(user_id = user.id, "User logged out");
    Ok((
        jar.remove(state.session_manager.removal_cookie()),
        Redirect::to("/"),
    ))
}

/// Calculator input form
pub async fn calculator(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<impl IntoResponse> {
    let user = state.user_repository.find_by_id(user.id).await?;
    Ok(Json(FormView::calculator(
        user.as_ref().map(UserResponse::from),
    )))
}

pub async fn calculate_form_redirect() -> Redirect {
    Redirect::to("/calculator")
}

/// Validate, compute, persist, then describe the result.
///
/// Nothing is written unless validation succeeds.
pub async fn calculate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(raw): Form<RawInput>,
) -> AppResult<impl IntoResponse> {
    let input = raw.validate()?;
    let result = compute(&input);
    let insights = advise(&input, &result, result.projected_annual_tons());

    let record = state
        .record_repository
        .append(user.id, result.total_co2)
        .await?;

    info!(
        user_id = user.id,
        record_id = record.id,
        period = input.period.as_str(),
        total_co2 = result.total_co2,
        "Stored calculation"
    );

    Ok(Json(CalculationView::new(input, result, insights, &record)))
}

/// Users with the lowest personal best
pub async fn leaderboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let entries = state
        .record_repository
        .top_minimums(LEADERBOARD_SIZE)
        .await?;

    Ok(Json(LeaderboardView::from(entries)))
}

/// The caller's recent results
pub async fn history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<impl IntoResponse> {
    let records = state
        .record_repository
        .history(user.id, HISTORY_LIMIT)
        .await?;

    Ok(Json(HistoryView { records }))
}
