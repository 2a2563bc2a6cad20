use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::ReviewsResponse, repo, repo_types::Review};
use crate::{
    auth::AuthUser, dto::MessageResponse, error::AppError, form::FormPayload, state::AppState,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/add_review", post(add_review))
}

#[instrument(skip(state, form))]
pub async fn add_review(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let review = Review::from_form(username.clone(), &form);
    let id = repo::insert(state.store.as_ref(), &review).await?;
    info!(%username, review_id = %id, "review added");
    Ok(Json(MessageResponse::success()))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<ReviewsResponse>, AppError> {
    let reviews = repo::list_by_author(state.store.as_ref(), &username).await?;
    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(|r| r.into_json()).collect(),
    }))
}
