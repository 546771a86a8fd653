//! Error payload returned with non-success responses

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// `{"errors": [{"code": 89, "message": "Invalid or expired token."}]}`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrors {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl ApiErrors {
    pub fn first(&self) -> Option<&ApiErrorDetail> {
        self.errors.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}
