use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{dto::UserResponse, repo::by_username, repo_types::Account};
use crate::{
    auth::AuthUser, dto::MessageResponse, error::AppError, form::FormPayload,
    patch::apply_partial_update, state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user))
        .route("/update_user", post(update_user))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = Account::profile(state.store.as_ref(), &username).await?;
    Ok(Json(UserResponse {
        user: user.unwrap_or(Value::Null),
    }))
}

#[instrument(skip(state, form))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    apply_partial_update::<Account>(state.store.as_ref(), &by_username(&username), &form)
        .await
        .inspect_err(|_| warn!(%username, "update_user failed"))?;

    info!(%username, "profile updated");
    Ok(Json(MessageResponse::success()))
}
