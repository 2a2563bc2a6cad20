use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{dto::CategoriesResponse, repo, repo_types::Category};
use crate::{
    auth::AuthUser,
    dto::MessageResponse,
    error::AppError,
    form::FormPayload,
    patch::{apply_partial_update, merge_asset},
    state::AppState,
};

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/add_category", post(add_category))
        .route("/update_category", post(update_category))
        .route("/delete_category", post(delete_category))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthUser(_username): AuthUser,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = repo::list_all(state.store.as_ref()).await?;
    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(|c| c.into_json()).collect(),
    }))
}

#[instrument(skip(state, form))]
pub async fn add_category(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let mut category = Category::from_form(username.clone(), &form);
    merge_asset(&mut category, &form);

    let id = repo::insert(state.store.as_ref(), &category).await?;
    info!(%username, category_id = %id, "category added");
    Ok(Json(MessageResponse::success()))
}

#[instrument(skip(state, form))]
pub async fn update_category(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let id = form.id("category_id")?;
    apply_partial_update::<Category>(state.store.as_ref(), &repo::owned(id, &username), &form)
        .await
        .inspect_err(|_| warn!(%username, category_id = %id, "update_category failed"))?;

    info!(%username, category_id = %id, "category updated");
    Ok(Json(MessageResponse::success()))
}

#[instrument(skip(state, form))]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    form: FormPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let id = form.id("category_id")?;
    if !repo::delete_owned(state.store.as_ref(), id, &username).await? {
        warn!(%username, category_id = %id, "delete_category: no such category");
        return Err(AppError::NotFound);
    }

    info!(%username, category_id = %id, "category deleted");
    Ok(Json(MessageResponse::success()))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{get, post_form, post_multipart, TestApp};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn categories(app: &TestApp, token: &str) -> Vec<Value> {
        let (status, body) = app.send(get("/categories", Some(token))).await;
        assert_eq!(status, StatusCode::OK);
        body["categories"].as_array().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn listing_is_shared_across_owners() {
        let app = TestApp::new();
        let a = app.token_for("bistro");
        let b = app.token_for("diner");

        let (status, body) = app
            .send(post_form("/add_category", Some(&a), &[("name", "Soups"), ("subcategories", "hot,cold")]))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": true}));
        app.send(post_form("/add_category", Some(&b), &[("name", "Drinks")]))
            .await;

        let seen_by_b = categories(&app, &b).await;
        assert_eq!(seen_by_b.len(), 2);
        assert_eq!(seen_by_b[0]["name"], json!("Soups"));
        assert_eq!(seen_by_b[0]["subcategories"], json!("hot,cold"));
        assert_eq!(seen_by_b[0]["description"], Value::Null);
        assert_eq!(seen_by_b[1]["name"], json!("Drinks"));
    }

    #[tokio::test]
    async fn update_keeps_unsent_fields_and_swaps_photo() {
        let app = TestApp::new();
        let token = app.token_for("bistro");
        app.send(post_form(
            "/add_category",
            Some(&token),
            &[("name", "Soups"), ("description", "Daily")],
        ))
        .await;
        let id = categories(&app, &token).await[0]["_id"].as_str().unwrap().to_string();

        let logo = b"GIF89a\x01\x00\x01\x00";
        let (status, _) = app
            .send(post_multipart(
                "/update_category",
                Some(&token),
                &[("category_id", id.as_str()), ("name", "Broths")],
                &[("photo", "c.gif", logo.as_slice())],
            ))
            .await;
        assert_eq!(status, StatusCode::OK);

        let listed = categories(&app, &token).await;
        assert_eq!(listed[0]["name"], json!("Broths"));
        assert_eq!(listed[0]["description"], json!("Daily"));
        let photo = listed[0]["photo"].as_str().unwrap();
        assert_eq!(crate::assets::decode_asset(photo).unwrap(), logo.to_vec());
    }

    #[tokio::test]
    async fn mutations_are_owner_scoped() {
        let app = TestApp::new();
        let owner = app.token_for("bistro");
        let stranger = app.token_for("diner");
        app.send(post_form("/add_category", Some(&owner), &[("name", "Soups")]))
            .await;
        let id = categories(&app, &owner).await[0]["_id"].as_str().unwrap().to_string();

        let (status, body) = app
            .send(post_form("/update_category", Some(&stranger), &[("category_id", id.as_str()), ("name", "X")]))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": false}));

        let (status, _) = app
            .send(post_form("/delete_category", Some(&stranger), &[("category_id", id.as_str())]))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(categories(&app, &owner).await.len(), 1);

        let (status, body) = app
            .send(post_form("/delete_category", Some(&owner), &[("category_id", id.as_str())]))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": true}));
        assert!(categories(&app, &owner).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let app = TestApp::new();
        let token = app.token_for("bistro");
        let (status, body) = app
            .send(post_form("/update_category", Some(&token), &[("category_id", "not-an-id")]))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": false}));
    }
}
