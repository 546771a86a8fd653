//! Cards and their discriminated `binding_values` payload
//!
//! Each entry of `binding_values` is an object whose `type` field decides
//! which sibling member holds the value:
//!
//! ```json
//! {
//!   "title": { "type": "STRING", "string_value": "Hello" },
//!   "thumbnail_image": {
//!     "type": "IMAGE",
//!     "image_value": { "url": "...", "width": 144, "height": 144 }
//!   }
//! }
//! ```
//!
//! Entries with an unrecognized tag, a missing tag, or a payload of the
//! wrong shape decode to [`BindingValue::Unknown`] instead of failing the
//! surrounding tweet.

use std::collections::btree_map::{self, BTreeMap};

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TYPE_MEMBER: &str = "type";
const STRING_TYPE: &str = "STRING";
const BOOLEAN_TYPE: &str = "BOOLEAN";
const NUMBER_TYPE: &str = "NUMBER";
const IMAGE_TYPE: &str = "IMAGE";
const USER_TYPE: &str = "USER";
const STRING_MEMBER: &str = "string_value";
const BOOLEAN_MEMBER: &str = "boolean_value";
const NUMBER_MEMBER: &str = "number_value";
const IMAGE_MEMBER: &str = "image_value";
const USER_MEMBER: &str = "user_value";

/// Card attached to a tweet (player, summary, poll, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card type, e.g. `player` or `poll2choice_text_only`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub binding_values: BindingValues,
}

/// Image variant of a binding value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageValue {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// User reference variant of a binding value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserValue {
    #[serde(default)]
    pub id_str: String,
}

/// One decoded entry of `binding_values`
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    String(String),
    Boolean(bool),
    Number(f64),
    Image(ImageValue),
    User(UserValue),
    /// Unrecognized or malformed entry
    Unknown,
}

impl BindingValue {
    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Unknown;
        };
        let Some(kind) = object.get(TYPE_MEMBER).and_then(Value::as_str) else {
            return Self::Unknown;
        };

        let decoded = match kind {
            STRING_TYPE => object
                .get(STRING_MEMBER)
                .and_then(Value::as_str)
                .map(|s| Self::String(s.to_owned())),
            BOOLEAN_TYPE => object.get(BOOLEAN_MEMBER).and_then(Value::as_bool).map(Self::Boolean),
            NUMBER_TYPE => object.get(NUMBER_MEMBER).and_then(number_from_json).map(Self::Number),
            IMAGE_TYPE => object
                .get(IMAGE_MEMBER)
                .and_then(|v| ImageValue::deserialize(v).ok())
                .map(Self::Image),
            USER_TYPE => object
                .get(USER_MEMBER)
                .and_then(|v| UserValue::deserialize(v).ok())
                .map(Self::User),
            _ => None,
        };

        decoded.unwrap_or(Self::Unknown)
    }

    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => tagged(STRING_TYPE, STRING_MEMBER, Value::from(s.as_str())),
            Self::Boolean(b) => tagged(BOOLEAN_TYPE, BOOLEAN_MEMBER, Value::from(*b)),
            Self::Number(n) => tagged(NUMBER_TYPE, NUMBER_MEMBER, Value::from(*n)),
            Self::Image(image) => {
                tagged(IMAGE_TYPE, IMAGE_MEMBER, serde_json::to_value(image).unwrap_or_default())
            }
            Self::User(user) => {
                tagged(USER_TYPE, USER_MEMBER, serde_json::to_value(user).unwrap_or_default())
            }
            Self::Unknown => Value::Null,
        }
    }
}

fn tagged(kind: &str, member: &str, value: Value) -> Value {
    let mut object = Map::new();
    object.insert(TYPE_MEMBER.to_owned(), Value::from(kind));
    object.insert(member.to_owned(), value);
    Value::Object(object)
}

/// Numbers sometimes arrive as strings ("12.5"); accept both.
fn number_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Keyed, heterogeneous card values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingValues {
    values: BTreeMap<String, BindingValue>,
}

impl BindingValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from a raw JSON value. Anything but an object yields an empty
    /// set of values.
    pub fn from_json(value: &Value) -> Self {
        let values = value
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .map(|(key, entry)| (key.clone(), BindingValue::from_json(entry)))
                    .collect()
            })
            .unwrap_or_default();
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: BindingValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&BindingValue> {
        self.values.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            BindingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            BindingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            BindingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn get_image(&self, key: &str) -> Option<&ImageValue> {
        match self.values.get(key)? {
            BindingValue::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn get_user(&self, key: &str) -> Option<&UserValue> {
        match self.values.get(key)? {
            BindingValue::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BindingValue> {
        self.values.iter()
    }
}

impl<'de> Deserialize<'de> for BindingValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for BindingValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let known: Map<String, Value> = self
            .values
            .iter()
            .filter(|(_, value)| !matches!(value, BindingValue::Unknown))
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();

        let mut map = serializer.serialize_map(Some(known.len()))?;
        for (key, value) in &known {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
