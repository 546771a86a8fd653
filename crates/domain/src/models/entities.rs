//! Entity annotations attached to tweets and user profiles

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Entities extracted from tweet text.
///
/// Every list is guaranteed non-null after decoding: absent or `null`
/// arrays become empty vectors.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetEntities {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub media: Vec<MediaEntity>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub hashtags: Vec<HashtagEntity>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub symbols: Vec<SymbolEntity>,
}

impl TweetEntities {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
            && self.user_mentions.is_empty()
            && self.media.is_empty()
            && self.hashtags.is_empty()
            && self.symbols.is_empty()
    }
}

/// Entities found in a user's profile fields
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserEntities {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub url: UrlEntities,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: UrlEntities,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlEntities {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlEntity {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub indices: Vec<i32>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionEntity {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub indices: Vec<i32>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashtagEntity {
    #[serde(default)]
    pub text: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub indices: Vec<i32>,
}

/// Cashtag such as `$TWTR`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntity {
    #[serde(default)]
    pub text: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub indices: Vec<i32>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaEntity {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub media_url_https: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub expanded_url: Option<String>,
    /// `photo`, `video` or `animated_gif`
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    /// Keyed by size name (`thumb`, `small`, `medium`, `large`)
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub sizes: HashMap<String, MediaSize>,
    #[serde(default)]
    pub video_info: Option<VideoInfo>,
    #[serde(default)]
    pub ext_alt_text: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub indices: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSize {
    #[serde(default)]
    pub w: i32,
    #[serde(default)]
    pub h: i32,
    /// `fit` or `crop`
    #[serde(default)]
    pub resize: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub aspect_ratio: Vec<i32>,
    #[serde(default)]
    pub duration_millis: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub variants: Vec<VideoVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoVariant {
    #[serde(default)]
    pub bitrate: Option<i64>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
