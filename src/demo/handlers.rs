use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;
use tracing::instrument;

use crate::{
    error::AppError,
    state::AppState,
    store::{Collection, Filter},
    users::dto::UserResponse,
};

pub fn demo_routes() -> Router<AppState> {
    Router::new()
        .route("/demo_user", get(demo_user))
        .route("/demo_menu", get(demo_menu))
}

async fn all_of(state: &AppState, collection: Collection) -> Result<Vec<Value>, AppError> {
    let docs = state.store.find(collection, &Filter::all()).await?;
    Ok(docs.into_iter().map(|d| d.into_json()).collect())
}

/// Every demo profile, wrapped as `{"user": [...]}`.
#[instrument(skip(state))]
pub async fn demo_user(State(state): State<AppState>) -> Result<Json<UserResponse>, AppError> {
    let users = all_of(&state, Collection::DemoUser).await?;
    Ok(Json(UserResponse {
        user: Value::Array(users),
    }))
}

/// Demo dishes as a bare array.
#[instrument(skip(state))]
pub async fn demo_menu(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(all_of(&state, Collection::DemoMenu).await?))
}

#[cfg(test)]
mod tests {
    use crate::store::Collection;
    use crate::test_support::{get, TestApp};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn seed(app: &TestApp, collection: Collection, v: Value) {
        let Value::Object(body) = v else {
            unreachable!()
        };
        app.state.store.insert_one(collection, body).await.unwrap();
    }

    #[tokio::test]
    async fn demo_data_needs_no_token() {
        let app = TestApp::new();
        seed(&app, Collection::DemoUser, json!({"username": "demo", "name": "Demo Cafe"})).await;
        seed(&app, Collection::DemoMenu, json!({"name": "Soup", "likes": 0})).await;
        seed(&app, Collection::DemoMenu, json!({"name": "Tea", "likes": 2})).await;

        let (status, body) = app.send(get("/demo_user", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"][0]["name"], json!("Demo Cafe"));

        let (status, body) = app.send(get("/demo_menu", None)).await;
        assert_eq!(status, StatusCode::OK);
        let menu = body.as_array().unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0]["name"], json!("Soup"));
        assert_eq!(menu[1]["name"], json!("Tea"));
    }

    #[tokio::test]
    async fn empty_demo_collections_render_empty() {
        let app = TestApp::new();
        let (_, body) = app.send(get("/demo_user", None)).await;
        assert_eq!(body, json!({"user": []}));
        let (_, body) = app.send(get("/demo_menu", None)).await;
        assert_eq!(body, json!([]));
    }
}
