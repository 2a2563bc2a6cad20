use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, RefreshRequest, TokenPair},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    dto::MessageResponse,
    error::AppError,
    extract::JsonBody,
    state::AppState,
    users::repo_types::Account,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

fn issue_pair(keys: &JwtKeys, username: &str) -> Result<TokenPair, AppError> {
    let access_token = keys.sign_access(username).inspect_err(|e| {
        error!(error = %e, "jwt sign access failed");
    })?;
    let refresh_token = keys.sign_refresh(username).inspect_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
    })?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Stores the account with a hashed password. Usernames are not checked for
/// uniqueness.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let hash = hash_password(&payload.password)?;
    let account = Account::new(payload.username, hash);
    let id = Account::create(state.store.as_ref(), &account).await?;

    info!(username = %account.username, account_id = %id, "user registered");
    Ok(Json(MessageResponse::success()))
}

/// Unknown usernames, wrong passwords and unreadable credentials all fail
/// identically.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<JsonBody<CredentialsRequest>, AppError>,
) -> Result<Json<TokenPair>, AppError> {
    let JsonBody(payload) = payload.map_err(|_| AppError::InvalidCredentials)?;

    let Some(account) = Account::find_by_username(state.store.as_ref(), &payload.username).await?
    else {
        warn!(username = %payload.username, "login unknown username");
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password(&payload.password, &account.password_hash).unwrap_or_else(|e| {
        error!(error = %e, "stored credential unreadable");
        false
    });
    if !ok {
        warn!(username = %payload.username, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let pair = issue_pair(&JwtKeys::from_ref(&state), &account.username)?;
    info!(username = %account.username, "user logged in");
    Ok(Json(pair))
}

/// Exchanges a refresh token for a new pair.
#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::Unauthorized("invalid refresh token")
    })?;

    let pair = issue_pair(&keys, &claims.sub)?;
    info!(username = %claims.sub, "tokens refreshed");
    Ok(Json(pair))
}
