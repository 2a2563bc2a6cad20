use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{DishFilter, DishesResponse, LikeOp},
    repo,
    repo_types::Dish,
};
use crate::{
    auth::AuthUser,
    dto::MessageResponse,
    error::AppError,
    extract::QueryParams,
    form::FormPayload,
    patch::{apply_partial_update, merge_asset},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/dishes", get(list_dishes))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/add_dish", post(add_dish))
        .route("/update_dish", post(update_dish))
        .route("/delete_dish", post(delete_dish))
        .route("/edit_likes", post(edit_likes))
}

#[instrument(skip(state))]
pub async fn list_dishes(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    QueryParams(narrow): QueryParams<DishFilter>,
) -> Result<Json<DishesResponse>, AppError> {
    let dishes = repo::list_for_owner(state.store.as_ref(), &username, &narrow).await?;
    Ok(Json(DishesResponse {
        dishes: dishes.into_iter().map(|d| d.into_json()).collect(),
    }))
}

#[instrument(skip(state, form))]
pub async fn add_dish(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let mut dish = Dish::from_form(username.clone(), &form);
    merge_asset(&mut dish, &form);

    let id = repo::insert(state.store.as_ref(), &dish).await?;
    info!(%username, dish_id = %id, "dish added");
    Ok(Json(MessageResponse::success()))
}

#[instrument(skip(state, form))]
pub async fn update_dish(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let id = form.id("dish_id")?;
    apply_partial_update::<Dish>(state.store.as_ref(), &repo::owned(id, &username), &form)
        .await
        .inspect_err(|_| warn!(%username, dish_id = %id, "update_dish failed"))?;

    info!(%username, dish_id = %id, "dish updated");
    Ok(Json(MessageResponse::success()))
}

#[instrument(skip(state, form))]
pub async fn delete_dish(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let id = form.id("dish_id")?;
    if !repo::delete_owned(state.store.as_ref(), id, &username).await? {
        warn!(%username, dish_id = %id, "delete_dish: no such dish");
        return Err(AppError::NotFound);
    }

    info!(%username, dish_id = %id, "dish deleted");
    Ok(Json(MessageResponse::success()))
}

#[instrument(skip(state, form))]
pub async fn edit_likes(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let id = form.id("dish_id")?;
    let op: LikeOp = form.required("type")?.parse().map_err(AppError::BadRequest)?;

    match repo::adjust_likes(state.store.as_ref(), id, &username, op).await? {
        Some(likes) => {
            info!(%username, dish_id = %id, ?op, likes, "likes adjusted");
            Ok(Json(MessageResponse::success()))
        }
        None => {
            warn!(%username, dish_id = %id, "edit_likes: no such dish");
            Err(AppError::NotFound)
        }
    }
}
