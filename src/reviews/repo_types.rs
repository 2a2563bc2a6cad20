use serde::{Deserialize, Serialize};

use crate::form::FormPayload;

/// Review document in the `reviews` collection. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub dishes_rate: Option<String>,
    pub service_rate: Option<String>,
    pub comment: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub username: String, // author
}

impl Review {
    pub fn from_form(username: String, form: &FormPayload) -> Self {
        let text = |key: &str| form.field(key).map(str::to_string);
        Self {
            dishes_rate: text("dishes_rate"),
            service_rate: text("service_rate"),
            comment: text("comment"),
            phone: text("phone"),
            email: text("email"),
            name: text("name"),
            username,
        }
    }
}
