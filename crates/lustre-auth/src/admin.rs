//! Single-admin login and token refresh.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::password::verify_password;
use crate::tokens::{TokenIssuer, TokenKind};
use crate::{AuthError, AuthSettings, AuthenticatedUser, TokenValidator};

/// Tokens and identity returned by a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthenticatedUser,
}

/// A fresh access token minted from a refresh token.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshGrant {
    pub access: String,
    pub user: AuthenticatedUser,
}

/// Checks the configured admin credential and mints tokens.
#[derive(Debug)]
pub struct AdminAuth {
    username: String,
    email: String,
    password_hash: String,
    issuer: TokenIssuer,
}

impl AdminAuth {
    pub fn new(settings: &AuthSettings) -> Self {
        if settings.email.is_empty() || settings.password_hash.is_empty() {
            log::warn!("No admin credential configured; every login will be rejected");
        }
        Self {
            username: settings.username.clone(),
            email: settings.email.clone(),
            password_hash: settings.password_hash.clone(),
            issuer: TokenIssuer::new(settings),
        }
    }

    /// Token issuer, for validating access tokens on protected routes.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    fn admin(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Exchange the admin email and password for an access/refresh pair.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginGrant, AuthError> {
        if self.email.is_empty() || email != self.email {
            return Err(AuthError::InvalidCredentials);
        }
        if !verify_password(password, &self.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self.admin();
        log::info!("Admin login for {}", user.email);
        Ok(LoginGrant {
            access_token: self.issuer.issue(&user, TokenKind::Access)?,
            refresh_token: self.issuer.issue(&user, TokenKind::Refresh)?,
            user,
        })
    }

    /// Verify a refresh token and mint a new access token for its user.
    pub fn refresh(&self, refresh_token: &str) -> Result<RefreshGrant, AuthError> {
        let user = self.issuer.verify(refresh_token, TokenKind::Refresh)?;
        Ok(RefreshGrant {
            access: self.issuer.issue(&user, TokenKind::Access)?,
            user,
        })
    }
}

impl TokenValidator for AdminAuth {
    fn validate(
        &self,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        self.issuer.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::hash_password;

    fn auth() -> AdminAuth {
        AdminAuth::new(&AuthSettings {
            username: "admin".to_string(),
            email: "admin@lustre.test".to_string(),
            password_hash: hash_password("s3cret").unwrap(),
            access_secret: "a".to_string(),
            refresh_secret: "r".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_login_success() {
        let auth = auth();
        let grant = auth.login("admin@lustre.test", "s3cret").unwrap();
        assert_eq!(grant.user.username, "admin");
        let user = auth
            .issuer()
            .verify(&grant.access_token, TokenKind::Access)
            .unwrap();
        assert_eq!(user, grant.user);
    }

    #[test]
    fn test_login_wrong_email_or_password() {
        let auth = auth();
        assert!(matches!(
            auth.login("other@lustre.test", "s3cret"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("admin@lustre.test", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_without_configured_admin() {
        let auth = AdminAuth::new(&AuthSettings::default());
        assert!(auth.login("", "").is_err());
    }

    #[test]
    fn test_refresh() {
        let auth = auth();
        let grant = auth.login("admin@lustre.test", "s3cret").unwrap();
        let refreshed = auth.refresh(&grant.refresh_token).unwrap();
        assert_eq!(refreshed.user.email, "admin@lustre.test");
        assert!(auth.issuer().verify(&refreshed.access, TokenKind::Access).is_ok());

        // An access token is not a refresh token
        assert!(auth.refresh(&grant.access_token).is_err());
    }

    #[test]
    fn test_login_grant_json_shape() {
        let grant = auth().login("admin@lustre.test", "s3cret").unwrap();
        let json = serde_json::to_value(&grant).unwrap();
        assert!(json["accessToken"].is_string());
        assert!(json["refreshToken"].is_string());
        assert_eq!(json["user"]["email"], "admin@lustre.test");
    }
}
