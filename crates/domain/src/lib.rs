//! # Twitkit Domain
//!
//! Domain types for the twitkit REST client.
//!
//! This crate contains:
//! - The error taxonomy and Result alias
//! - Sessions, auth tokens and app credentials
//! - Client configuration structures
//! - API response models with null-tolerant collections
//!
//! ## Architecture
//! - No dependencies on other twitkit crates
//! - No I/O; only serde-based data structures

pub mod config;
pub mod errors;
pub mod models;
pub mod session;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use models::*;
pub use session::*;
