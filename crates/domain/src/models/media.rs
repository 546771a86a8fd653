//! Uploaded media handle

use serde::{Deserialize, Serialize};

/// Response of `media/upload`; pass `media_id_string` to a status update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub media_id: i64,
    #[serde(default)]
    pub media_id_string: String,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub expires_after_secs: Option<i64>,
    #[serde(default)]
    pub image: Option<ImageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub w: i32,
    #[serde(default)]
    pub h: i32,
    #[serde(default)]
    pub image_type: Option<String>,
}
