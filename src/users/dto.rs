use serde::Serialize;
use serde_json::Value;

/// `GET /user` and `GET /demo_user` body.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: Value,
}
