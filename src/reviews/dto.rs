use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Value>,
}
