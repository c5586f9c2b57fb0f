//! Admin authentication for lustre.
//!
//! Provides:
//! - [`AuthSettings`]: injected admin credential, token secrets and lifetimes
//! - [`AdminAuth`]: login and refresh against the single admin identity
//! - [`TokenIssuer`]: HS256 access/refresh token signing and verification
//! - [`hash_password`] / [`verify_password`]: Argon2id PHC hashes
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over `TokenValidator`
//! - [`AuthError`]: auth-specific error types

mod admin;
mod error;
mod middleware;
mod password;
mod tokens;
mod user;

use serde::{Deserialize, Serialize};

pub use admin::{AdminAuth, LoginGrant, RefreshGrant};
pub use error::AuthError;
pub use middleware::{extract_bearer_token, AuthLayer, AuthService};
pub use password::{hash_password, verify_password};
pub use tokens::{Claims, TokenIssuer, TokenKind};
pub use user::{user_from_parts, AuthenticatedUser};

/// Authentication settings.
///
/// The admin credential is supplied at startup; nothing is read from the
/// environment here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Whether protected routes require a token. When false, all requests pass through.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Admin display name carried in tokens.
    #[serde(default)]
    pub username: String,

    /// Admin login email.
    #[serde(default)]
    pub email: String,

    /// Argon2 PHC hash of the admin password.
    #[serde(default)]
    pub password_hash: String,

    /// HS256 secret for access tokens.
    #[serde(default)]
    pub access_secret: String,

    /// HS256 secret for refresh tokens.
    #[serde(default)]
    pub refresh_secret: String,

    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl_secs")]
    pub access_ttl_secs: u64,

    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl_secs")]
    pub refresh_ttl_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_access_ttl_secs() -> u64 {
    15 * 60
}

fn default_refresh_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_ttl_secs: default_access_ttl_secs(),
            refresh_ttl_secs: default_refresh_ttl_secs(),
        }
    }
}

/// Trait for validating tokens and extracting user identity.
///
/// The middleware calls `validate()` with the bearer token and attaches the
/// returned user to the request.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated user.
    fn validate(
        &self,
        token: &str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>,
    >;
}
