//! User profile model

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::entities::UserEntities;
use super::tweet::Tweet;

/// Twitter user as returned by `account/verify_credentials` and embedded
/// in tweets
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub entities: UserEntities,
    #[serde(default)]
    pub protected: Option<bool>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub followers_count: Option<i64>,
    #[serde(default)]
    pub friends_count: Option<i64>,
    #[serde(default)]
    pub listed_count: Option<i64>,
    #[serde(default)]
    pub favourites_count: Option<i64>,
    #[serde(default)]
    pub statuses_count: Option<i64>,
    /// Wire format `Wed Aug 27 13:08:45 +0000 2008`
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
    #[serde(default)]
    pub profile_banner_url: Option<String>,
    #[serde(default)]
    pub default_profile_image: Option<bool>,
    /// Only present when requested with `include_email=true` and the app is
    /// whitelisted for it
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<Box<Tweet>>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub withheld_in_countries: Vec<String>,
}
