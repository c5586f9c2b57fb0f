//! HS256 access and refresh tokens.
//!
//! Both token kinds carry `{username, email, kind, iat, exp}` claims and use
//! their own signing secret and lifetime. `verify` checks the `kind` claim, so
//! a refresh token is rejected where an access token is expected even when
//! both secrets are the same.

use std::future::Future;
use std::pin::Pin;
use std::time::{SystemTime, UNIX_EPOCH};

use argon2::password_hash::rand_core::{OsRng, RngCore};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{AuthError, AuthSettings, AuthenticatedUser, TokenValidator};

/// Which secret and lifetime a token uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub email: String,
    pub kind: TokenKind,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    fn user(self) -> AuthenticatedUser {
        AuthenticatedUser {
            username: self.username,
            email: self.email,
        }
    }
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl KeyPair {
    fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }
}

/// Signs and verifies lustre tokens.
pub struct TokenIssuer {
    access: KeyPair,
    refresh: KeyPair,
    validation: Validation,
}

impl TokenIssuer {
    /// Build an issuer from settings.
    ///
    /// Empty secrets are replaced by random per-process secrets, so tokens
    /// issued before a restart stop verifying.
    pub fn new(settings: &AuthSettings) -> Self {
        let access_secret = secret_or_ephemeral(&settings.access_secret, "access_secret");
        let refresh_secret = secret_or_ephemeral(&settings.refresh_secret, "refresh_secret");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: KeyPair::new(&access_secret, settings.access_ttl_secs),
            refresh: KeyPair::new(&refresh_secret, settings.refresh_ttl_secs),
            validation,
        }
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Sign a token of `kind` for `user`.
    pub fn issue(&self, user: &AuthenticatedUser, kind: TokenKind) -> Result<String, AuthError> {
        let keys = self.keys(kind);
        let iat = now_secs();
        let claims = Claims {
            username: user.username.clone(),
            email: user.email.clone(),
            kind,
            iat,
            exp: iat + keys.ttl_secs,
        };
        self.sign(&claims, kind)
    }

    /// Sign explicit claims.
    pub fn sign(&self, claims: &Claims, kind: TokenKind) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys(kind).encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token of `kind` and return its user.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)?;
        if data.claims.kind != kind {
            return Err(AuthError::InvalidFormat(format!(
                "expected {kind:?} token, got {:?}",
                data.claims.kind
            )));
        }
        Ok(data.claims.user())
    }
}

impl TokenValidator for TokenIssuer {
    fn validate(
        &self,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        let result = self.verify(token, TokenKind::Access);
        Box::pin(async move { result })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_secs", &self.access.ttl_secs)
            .field("refresh_ttl_secs", &self.refresh.ttl_secs)
            .finish()
    }
}

fn secret_or_ephemeral(secret: &str, name: &str) -> Vec<u8> {
    if !secret.is_empty() {
        return secret.as_bytes().to_vec();
    }
    log::warn!("auth.{name} is not set; using a random secret for this process");
    let mut bytes = vec![0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
