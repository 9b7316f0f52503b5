//! REST API access for the SIGVIB asset-tracking service.
//!
//! This module provides the `AuthorizedFetcher` for bearer-authenticated
//! requests and the `AssetService` read operations built on top of it.
//!
//! The API authenticates with a bearer token obtained through the login
//! endpoint and wraps successful bodies in a `{result}` envelope.

pub mod assets;
pub mod error;
pub mod fetcher;

pub use assets::AssetService;
pub use error::ApiError;
pub use fetcher::AuthorizedFetcher;
