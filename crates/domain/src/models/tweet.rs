//! Tweet model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::card::Card;
use super::entities::TweetEntities;
use super::place::{Coordinates, Place};
use super::user::User;

/// `created_at` wire format, e.g. `Wed Aug 27 13:08:45 +0000 2008`
pub const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Present instead of `text` when requested with `tweet_mode=extended`
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub display_text_range: Vec<i32>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub truncated: Option<bool>,
    #[serde(default)]
    pub in_reply_to_status_id: Option<i64>,
    #[serde(default)]
    pub in_reply_to_user_id: Option<i64>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub place: Option<Place>,
    #[serde(default)]
    pub is_quote_status: Option<bool>,
    #[serde(default)]
    pub quoted_status_id: Option<i64>,
    #[serde(default)]
    pub quoted_status: Option<Box<Tweet>>,
    #[serde(default)]
    pub retweeted_status: Option<Box<Tweet>>,
    #[serde(default)]
    pub retweet_count: Option<i64>,
    #[serde(default)]
    pub favorite_count: Option<i64>,
    #[serde(default)]
    pub favorited: Option<bool>,
    #[serde(default)]
    pub retweeted: Option<bool>,
    #[serde(default)]
    pub possibly_sensitive: Option<bool>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub entities: TweetEntities,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub extended_entities: TweetEntities,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub withheld_in_countries: Vec<String>,
}

impl Tweet {
    /// Tweet body, preferring `full_text` over the legacy `text` field.
    pub fn body(&self) -> Option<&str> {
        self.full_text.as_deref().or(self.text.as_deref())
    }

    /// Parsed `created_at`; `None` when absent or not in the wire format.
    pub fn created_at_time(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT).ok()
    }

    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }
}
