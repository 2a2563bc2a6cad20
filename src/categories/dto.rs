use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Value>,
}
