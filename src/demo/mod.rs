//! Unauthenticated preview data. Nothing in the API writes these collections.

pub mod handlers;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::demo_routes()
}
