//! Curated collection (timeline) payload
//!
//! `collections/entries` returns objects keyed by id plus an ordered
//! timeline that references them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::tweet::Tweet;
use super::user::User;

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterCollection {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub objects: CollectionObjects,
    #[serde(default)]
    pub response: Option<CollectionMetadata>,
}

impl TwitterCollection {
    /// Tweets in timeline order, skipping references missing from `objects`.
    pub fn ordered_tweets(&self) -> Vec<&Tweet> {
        self.response
            .as_ref()
            .map(|meta| {
                meta.timeline
                    .iter()
                    .filter_map(|item| item.tweet.as_ref())
                    .filter_map(|reference| self.objects.tweets.get(&reference.id))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Tweets and users keyed by numeric id (ids arrive as JSON object keys)
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionObjects {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub tweets: HashMap<i64, Tweet>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub users: HashMap<i64, User>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    #[serde(default)]
    pub timeline_id: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub min_position: Option<i64>,
    #[serde(default)]
    pub max_position: Option<i64>,
    #[serde(default)]
    pub was_truncated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    #[serde(default)]
    pub tweet: Option<TweetReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetReference {
    #[serde(default)]
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_entries_payload() {
        let collection: TwitterCollection = serde_json::from_str(
            r#"{
                "objects": {
                    "tweets": {
                        "20": {"id": 20, "text": "second"},
                        "10": {"id": 10, "text": "first"}
                    },
                    "users": null
                },
                "response": {
                    "timeline_id": "custom-539487832448843776",
                    "position": {"min_position": 1, "max_position": 2, "was_truncated": false},
                    "timeline": [
                        {"tweet": {"id": 10}}, {"tweet": {"id": 20}}, {"tweet": {"id": 99}}
                    ]
                }
            }"#,
        )
        .unwrap();

        assert!(collection.objects.users.is_empty());
        let ordered: Vec<i64> = collection.ordered_tweets().iter().map(|t| t.id).collect();
        assert_eq!(ordered, vec![10, 20]);
    }

    #[test]
    fn test_null_objects_and_timeline() {
        let collection: TwitterCollection =
            serde_json::from_str(r#"{"objects": null, "response": {"timeline": null}}"#).unwrap();
        assert!(collection.objects.tweets.is_empty());
        assert!(collection.ordered_tweets().is_empty());
    }
}
