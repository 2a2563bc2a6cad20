use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional narrowing for `GET /dishes`.
#[derive(Debug, Default, Deserialize)]
pub struct DishFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DishesResponse {
    pub dishes: Vec<Value>,
}

/// Direction of a likes adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOp {
    Increment,
    Decrement,
}

impl LikeOp {
    pub fn delta(self) -> i64 {
        match self {
            LikeOp::Increment => 1,
            LikeOp::Decrement => -1,
        }
    }
}

impl FromStr for LikeOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "add" / "substract" are the spellings older clients send
        match s.trim() {
            "increment" | "add" => Ok(LikeOp::Increment),
            "decrement" | "substract" | "subtract" => Ok(LikeOp::Decrement),
            other => Err(format!("unknown like operation {other:?}")),
        }
    }
}
