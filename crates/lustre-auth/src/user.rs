//! Authenticated user identity and extraction helpers.

use serde::{Deserialize, Serialize};

/// The identity carried in lustre tokens.
///
/// Stored in HTTP request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub email: String,
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_parts() {
        let (mut parts, _body) = http::Request::new(()).into_parts();
        assert!(user_from_parts(&parts).is_none());

        parts.extensions.insert(AuthenticatedUser {
            username: "admin".to_string(),
            email: "admin@lustre.test".to_string(),
        });
        assert_eq!(user_from_parts(&parts).unwrap().username, "admin");
    }

    #[test]
    fn test_user_json_shape() {
        let user = AuthenticatedUser {
            username: "admin".to_string(),
            email: "admin@lustre.test".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"username": "admin", "email": "admin@lustre.test"}));
    }
}
