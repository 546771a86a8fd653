//! Service-wide limits from `help/configuration`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::entities::MediaSize;

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub dm_text_character_limit: Option<i32>,
    /// Path segments that cannot be used as screen names
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub non_username_paths: Vec<String>,
    #[serde(default)]
    pub photo_size_limit: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub photo_sizes: HashMap<String, MediaSize>,
    #[serde(default)]
    pub short_url_length_https: Option<i32>,
}
