//! Client core for the SIGVIB institutional asset-tracking API.
//!
//! This crate implements the authenticated-session and token-gated data
//! access layer the SIGVIB mobile screens sit on:
//!
//! - [`auth::TokenStore`] / [`auth::KeyringStore`]: durable bearer-token
//!   storage under the well-known `"token"` key
//! - [`auth::SessionManager`]: login with administrator role gating, logout,
//!   and silent restore from a persisted token
//! - [`api::AuthorizedFetcher`]: bearer-authenticated requests with a typed
//!   error taxonomy and `{result}` envelope unwrapping
//! - [`api::AssetService`]: asset listing, barcode lookup, local free-text
//!   search, and the occupancy summary
//!
//! Presentation concerns (screens, charts, camera capture) belong to the
//! consuming application; this crate performs no UI side effects.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, AssetService, AuthorizedFetcher};
pub use auth::{
    HttpAuthExchange, KeyringStore, MemoryStore, Role, Session, SessionManager, SessionState,
    TokenStore,
};
pub use config::Config;
pub use models::{Asset, OccupancySummary};
