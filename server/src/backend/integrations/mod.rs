//! # Integrations
//!
//! The text and image generation backend is an opaque collaborator reached
//! over HTTP. Services depend on [`IntegrationClient`]; [`HttpIntegrationClient`]
//! is the production implementation.

pub mod client;
pub mod http_client;
#[cfg(test)]
pub mod testing;

pub use client::{GeneratedImage, IntegrationClient, IntegrationError};
pub use http_client::HttpIntegrationClient;
