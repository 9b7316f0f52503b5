//! Durable storage for the session's bearer token.
//!
//! One token, one well-known key. Storage failures are logged and swallowed:
//! a broken keychain must never take the session flow down with it, so reads
//! degrade to "absent" and writes become best-effort no-ops.

use std::sync::Mutex;

use keyring::Entry;
use tracing::warn;

/// Keychain service name for this application.
const SERVICE_NAME: &str = "sigvib";

/// The single key the bearer token is stored under.
const TOKEN_KEY: &str = "token";

/// Persistence contract for the session token.
///
/// Implementations never propagate storage errors; `load` returns `None`
/// when nothing usable is stored.
pub trait TokenStore: Send + Sync {
    /// Persist the token, overwriting any prior value.
    fn save(&self, token: &str);

    /// The most recently saved token, or `None`.
    fn load(&self) -> Option<String>;

    /// Remove the persisted token.
    fn clear(&self);
}

/// Token storage backed by the OS keychain.
#[derive(Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry() -> Result<Entry, keyring::Error> {
        Entry::new(SERVICE_NAME, TOKEN_KEY)
    }
}

impl TokenStore for KeyringStore {
    fn save(&self, token: &str) {
        if let Err(e) = Self::entry().and_then(|entry| entry.set_password(token)) {
            warn!(error = %e, "Failed to persist session token");
        }
    }

    fn load(&self) -> Option<String> {
        match Self::entry().and_then(|entry| entry.get_password()) {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    fn clear(&self) {
        match Self::entry().and_then(|entry| entry.delete_credential()) {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => warn!(error = %e, "Failed to clear session token"),
        }
    }
}

/// In-process token storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}
