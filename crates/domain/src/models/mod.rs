//! API response models
//!
//! Every list and map field decodes absent or `null` JSON as an empty
//! collection (`serde_with::DefaultOnNull` plus `#[serde(default)]`), so
//! callers can iterate without checking for missing values.

pub mod api_errors;
pub mod card;
pub mod collection;
pub mod configuration;
pub mod entities;
pub mod media;
pub mod place;
pub mod search;
pub mod tweet;
pub mod user;

pub use api_errors::{ApiErrorDetail, ApiErrors};
pub use card::{BindingValue, BindingValues, Card, ImageValue, UserValue};
pub use collection::{
    CollectionMetadata, CollectionObjects, Position, TimelineItem, TweetReference,
    TwitterCollection,
};
pub use configuration::Configuration;
pub use entities::{
    HashtagEntity, MediaEntity, MediaSize, MentionEntity, SymbolEntity, TweetEntities,
    UrlEntities, UrlEntity, UserEntities, VideoInfo, VideoVariant,
};
pub use media::{ImageInfo, Media};
pub use place::{BoundingBox, Coordinates, Place};
pub use search::{Search, SearchMetadata};
pub use tweet::{Tweet, TWITTER_DATE_FORMAT};
pub use user::User;
