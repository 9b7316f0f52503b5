//! Session lifecycle: login, logout, and silent restore.
//!
//! The `SessionManager` owns all session state and is its only writer.
//! Login is a strict sequence: credential exchange, role check, then token
//! persistence - a token is never persisted before the role check passes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::auth::claims;
use crate::auth::store::TokenStore;
use crate::config::{Config, REQUEST_TIMEOUT_SECS};

/// Roles this client accepts. The API knows more, but only administrators
/// may use this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrator,
}

/// The current authenticated actor.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty() && self.role == Role::Administrator
    }
}

/// Observable session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// Credential exchange boundary.
///
/// The production implementation talks to the authentication endpoint; tests
/// substitute stubs so the state machine is exercised without a server.
#[async_trait]
pub trait AuthExchange: Send + Sync {
    /// Exchange credentials for a bearer token.
    ///
    /// A non-success status from the endpoint means invalid credentials and
    /// maps to `ApiError::Authentication`; transport failures map to
    /// `ApiError::Network`.
    async fn exchange(&self, username: &str, password: &str) -> Result<String, ApiError>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// `AuthExchange` over the real authentication endpoint.
pub struct HttpAuthExchange {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthExchange {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthExchange for HttpAuthExchange {
    async fn exchange(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Credential exchange rejected");
            return Err(ApiError::Authentication);
        }

        let body = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("auth response is not valid JSON: {e}")))?;
        Ok(login.token)
    }
}

/// Owns in-memory session state and synchronizes it with the token store.
pub struct SessionManager {
    exchange: Box<dyn AuthExchange>,
    store: Arc<dyn TokenStore>,
    state: SessionState,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(exchange: Box<dyn AuthExchange>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            exchange,
            store,
            state: SessionState::Unauthenticated,
            session: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .map(Session::is_authenticated)
            .unwrap_or(false)
    }

    /// Authenticate against the API and, on success, persist the token.
    ///
    /// The username is trimmed and lowercased before the exchange; the
    /// password is sent verbatim. Any failure leaves the manager
    /// `Unauthenticated` with nothing persisted.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let username = username.trim().to_lowercase();
        self.state = SessionState::Authenticating;
        self.session = None;

        let token = match self.exchange.exchange(&username, password).await {
            Ok(token) => token,
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                return Err(e);
            }
        };

        // Role check strictly precedes persistence.
        let claims = match claims::decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                return Err(e);
            }
        };
        if !claims.is_administrator() {
            warn!(role = ?claims.role, "Login rejected: administrator role required");
            self.state = SessionState::Unauthenticated;
            return Err(ApiError::Authorization);
        }

        self.store.save(&token);
        self.session = Some(Session {
            username,
            role: Role::Administrator,
            token,
            created_at: Utc::now(),
        });
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Clear the in-memory session and the persisted token. Best-effort and
    /// idempotent; always leaves the manager `Unauthenticated`.
    pub fn logout(&mut self) {
        self.session = None;
        self.state = SessionState::Unauthenticated;
        self.store.clear();
    }

    /// Attempt silent re-authentication from a previously persisted token.
    ///
    /// Returns whether a session was restored. A token that is absent,
    /// undecodable, or not an administrator token leaves the manager
    /// `Unauthenticated`; stale non-administrator tokens are cleared.
    pub fn restore(&mut self) -> bool {
        let Some(token) = self.store.load() else {
            return false;
        };

        match claims::decode_claims(&token) {
            Ok(claims) if claims.is_administrator() => {
                let username = claims.sub.clone().unwrap_or_default();
                self.session = Some(Session {
                    username,
                    role: Role::Administrator,
                    token,
                    created_at: Utc::now(),
                });
                self.state = SessionState::Authenticated;
                true
            }
            _ => {
                debug!("Persisted token is not a usable administrator token; clearing");
                self.store.clear();
                self.state = SessionState::Unauthenticated;
                false
            }
        }
    }
}
