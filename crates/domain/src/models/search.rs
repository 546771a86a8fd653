//! Search results

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::tweet::Tweet;

/// Response of `search/tweets`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Search {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub statuses: Vec<Tweet>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub max_id: Option<i64>,
    #[serde(default)]
    pub max_id_str: Option<String>,
    #[serde(default)]
    pub since_id: Option<i64>,
    #[serde(default)]
    pub since_id_str: Option<String>,
    #[serde(default)]
    pub refresh_url: Option<String>,
    /// Query string for the next (older) page, if any
    #[serde(default)]
    pub next_results: Option<String>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub completed_in: Option<f64>,
    #[serde(default)]
    pub query: Option<String>,
}
