//! # Twitkit Infrastructure
//!
//! I/O side of the twitkit client.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Request signing (OAuth 1.0a and guest tokens)
//! - Configuration loading from the environment or files
//! - The [`TwitterApiClient`] façade that ties them to the service registry
//!
//! ## Architecture
//! - Implements the transport port defined in `twitkit-core`
//! - Depends on `twitkit-domain` and `twitkit-core`

pub mod auth;
pub mod client;
pub mod config;
pub mod defaults;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use auth::{signer_for, GuestSigner, OAuth1Signer, RequestSigner, SigningTransport};
pub use client::{TwitterApiClient, TwitterApiClientBuilder};
pub use defaults::DefaultsProvider;
pub use errors::InfraError;
pub use http::{ReqwestTransport, ReqwestTransportBuilder, RetryingTransport};
