//! Auth-specific error types.

use http::StatusCode;

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// Token format is invalid (not a valid JWT).
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    /// JWT signature verification failed.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Email or password did not match the admin credential.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing or hash parsing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether this error is the caller's fault (4xx rather than 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidFormat(_)
                | AuthError::InvalidSignature(_)
                | AuthError::Expired
                | AuthError::InvalidCredentials
        )
    }

    /// HTTP status for this error on a protected route.
    ///
    /// Missing and expired tokens are 401 (log in again); a token that is
    /// present but forged or malformed is 403.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::Expired | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::InvalidFormat(_) | AuthError::InvalidSignature(_) => StatusCode::FORBIDDEN,
            AuthError::Hashing(_) | AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message for a protected route.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Access denied. No token provided.",
            AuthError::Expired => "Token expired. Please log in again.",
            AuthError::InvalidFormat(_) | AuthError::InvalidSignature(_) => "Invalid token.",
            AuthError::InvalidCredentials => "Invalid email or password",
            AuthError::Hashing(_) | AuthError::Signing(_) => {
                "An error occurred while verifying the token."
            }
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature(e.to_string()),
            _ => AuthError::InvalidFormat(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let e = AuthError::MissingToken;
        assert_eq!(e.to_string(), "missing authentication token");
    }

    #[test]
    fn test_is_client_error() {
        assert!(AuthError::MissingToken.is_client_error());
        assert!(AuthError::Expired.is_client_error());
        assert!(!AuthError::Hashing("err".into()).is_client_error());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidSignature("bad".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::Signing("bad".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            AuthError::Expired.public_message(),
            "Token expired. Please log in again."
        );
        assert_eq!(
            AuthError::InvalidFormat("x".into()).public_message(),
            "Invalid token."
        );
    }
}
