//! Geographic place and coordinate models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// `city`, `admin`, `country`, `poi`, ...
    #[serde(default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Free-form attributes such as `street_address`
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Polygon rings of `[longitude, latitude]` pairs
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub coordinates: Vec<Vec<Vec<f64>>>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// GeoJSON point (`[longitude, latitude]`)
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Coordinates {
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}
