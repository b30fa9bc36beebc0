//! HTTP client for the gatepass ticketing backend.
//!
//! [`ApiClient`] attaches the stored bearer token to every request and,
//! on a 401, performs a single-flight refresh against `/auth/refresh`
//! before retrying the original request exactly once. Credentials live
//! behind the [`CredentialStore`] seam so the CLI can persist them in the
//! OS keyring while tests use an in-memory store.

pub mod api;
mod client;
mod error;
mod query;
mod store;

pub use api::events::EventFilter;
pub use client::{ApiClient, ApiClientBuilder};
pub use error::ApiError;
pub use store::{CredentialStore, Credentials, MemoryStore, StoreError};
