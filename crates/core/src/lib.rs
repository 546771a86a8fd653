//! # Twitkit Core
//!
//! Transport-agnostic client machinery.
//!
//! This crate contains:
//! - The HTTP transport port ([`HttpTransport`]) and request/response types
//! - The JSON codec
//! - Call descriptions and their validation
//! - The remote call factory and the type-keyed service registry
//! - First-party service clients
//!
//! ## Architecture Principles
//! - Only depends on `twitkit-domain`
//! - No HTTP stack, no signing; both arrive through `HttpTransport`
//! - Services are plain data plus a binding, safe to share across threads

pub mod binding;
pub mod codec;
pub mod descriptor;
pub mod factory;
pub mod registry;
pub mod services;
pub mod transport;

pub use binding::{CallArgs, CallContext, ServiceBinding};
pub use codec::JsonCodec;
pub use descriptor::{
    CompiledEndpoint, CompiledService, EndpointSpec, Host, ParamLocation, ParamSpec,
    ServiceDescriptor,
};
pub use factory::{RemoteCallFactory, Service};
pub use registry::ServiceRegistry;
pub use services::{
    AccountService, CollectionQuery, CollectionService, ConfigurationService, FavoriteService,
    ListRef, ListService, ListTimeline, MediaPayload, MediaService, MediaUpload, ResultType,
    SearchQuery, SearchService, StatusLookup, StatusUpdate, StatusesService, TimelineQuery,
    UserRef, UserTimeline, VerifyCredentials,
};
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, MultipartField, RequestBody,
};
