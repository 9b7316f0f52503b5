//! Authentication module for managing the user session and its token.
//!
//! This module provides:
//! - `TokenStore` / `KeyringStore`: durable bearer-token storage under the
//!   well-known `"token"` key, with failures swallowed and logged
//! - `SessionManager`: login with administrator role gating, logout, and
//!   silent restore from a persisted token
//! - `decode_claims`: unverified decoding of the token's claim payload
//!
//! Only the `SessionManager` writes session state; everything else reads.

pub mod claims;
pub mod session;
pub mod store;

pub use claims::{decode_claims, TokenClaims, ADMINISTRATOR_ROLE};
pub use session::{AuthExchange, HttpAuthExchange, Role, Session, SessionManager, SessionState};
pub use store::{KeyringStore, MemoryStore, TokenStore};
