//! HTTP transport implementation

pub mod client;
pub mod retry;

pub use client::{ReqwestTransport, ReqwestTransportBuilder};
pub use retry::RetryingTransport;
