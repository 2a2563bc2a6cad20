use serde::Serialize;

/// Boolean envelope shared by every mutating endpoint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: bool,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self { message: true }
    }

    pub fn failure() -> Self {
        Self { message: false }
    }
}
