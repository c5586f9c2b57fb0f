//! Bearer-token Tower middleware.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with token validation.
//! Generic over `TokenValidator`.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::{AuthError, TokenValidator};

/// Tower `Layer` that wraps services with token authentication.
pub struct AuthLayer<V: TokenValidator> {
    validator: Arc<V>,
    enabled: bool,
}

impl<V: TokenValidator> Clone for AuthLayer<V> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            enabled: self.enabled,
        }
    }
}

impl<V: TokenValidator> AuthLayer<V> {
    /// Create a new auth layer. With `enabled == false` requests pass through.
    pub fn new(validator: Arc<V>, enabled: bool) -> Self {
        Self { validator, enabled }
    }
}

impl<V: TokenValidator, S> Layer<S> for AuthLayer<V> {
    type Service = AuthService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            validator: self.validator.clone(),
            enabled: self.enabled,
        }
    }
}

/// Tower `Service` that validates tokens before forwarding requests.
///
/// On success, inserts `AuthenticatedUser` into request extensions.
pub struct AuthService<V: TokenValidator, S> {
    inner: S,
    validator: Arc<V>,
    enabled: bool,
}

impl<V: TokenValidator, S: Clone> Clone for AuthService<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            validator: Arc::clone(&self.validator),
            enabled: self.enabled,
        }
    }
}

impl<V, S> Service<Request<Body>> for AuthService<V, S>
where
    V: TokenValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let validator = self.validator.clone();
        let enabled = self.enabled;

        Box::pin(async move {
            if !enabled {
                let resp = inner
                    .call(req)
                    .await
                    .unwrap_or_else(|infallible| match infallible {});
                return Ok(resp.into_response());
            }

            let token = match extract_bearer_token(req.headers()) {
                Some(t) => t.to_string(),
                None => return Ok(rejection_response(&AuthError::MissingToken)),
            };

            match validator.validate(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log::warn!("Authentication failed: {auth_err}");
                    Ok(rejection_response(&auth_err))
                }
            }
        })
    }
}

/// Extract the bearer token from the Authorization header.
///
/// A header with no token after the scheme counts as missing.
pub fn extract_bearer_token(headers: &http::HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Build the JSON rejection for an auth failure.
fn rejection_response(err: &AuthError) -> axum::response::Response {
    let status = err.status();
    let body = serde_json::json!({ "message": err.public_message() });

    let mut response = (
        status,
        [(http::header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response();

    if status == StatusCode::UNAUTHORIZED {
        response.headers_mut().insert(
            http::header::WWW_AUTHENTICATE,
            http::HeaderValue::from_static("Bearer"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthenticatedUser;
    use std::sync::Mutex;
    use tower::ServiceExt;

    // Accepts "valid-token", reports "old-token" as expired, rejects the rest.
    struct TestValidator;

    impl TokenValidator for TestValidator {
        fn validate(
            &self,
            token: &str,
        ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>>
        {
            let token = token.to_string();
            Box::pin(async move {
                match token.as_str() {
                    "valid-token" => Ok(AuthenticatedUser {
                        username: "admin".to_string(),
                        email: "admin@lustre.test".to_string(),
                    }),
                    "old-token" => Err(AuthError::Expired),
                    _ => Err(AuthError::InvalidSignature("bad token".to_string())),
                }
            })
        }
    }

    /// Mock inner service that captures the AuthenticatedUser.
    #[derive(Clone)]
    struct MockService {
        captured_user: Arc<Mutex<Option<AuthenticatedUser>>>,
    }

    impl MockService {
        fn new() -> Self {
            Self {
                captured_user: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl Service<Request<Body>> for MockService {
        type Response = axum::response::Response;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let captured = self.captured_user.clone();
            Box::pin(async move {
                let user = req.extensions().get::<AuthenticatedUser>().cloned();
                *captured.lock().unwrap() = user;
                Ok((StatusCode::OK, "ok").into_response())
            })
        }
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_message(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["message"].as_str().unwrap().to_string()
    }

    // ------------------------------------------------------------------------
    // Token extraction
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_bearer_token_valid() {
        let req = request(Some("Bearer my-token-123"));
        assert_eq!(extract_bearer_token(req.headers()), Some("my-token-123"));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        assert_eq!(extract_bearer_token(request(None).headers()), None);
        assert_eq!(extract_bearer_token(request(Some("Bearer ")).headers()), None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let req = request(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer_token(req.headers()), None);
    }

    // ------------------------------------------------------------------------
    // Middleware
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_middleware_disabled_passes_through() {
        let layer = AuthLayer::new(Arc::new(TestValidator), false);
        let resp = layer.layer(MockService::new()).oneshot(request(None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_missing_token_returns_401() {
        let layer = AuthLayer::new(Arc::new(TestValidator), true);
        let resp = layer.layer(MockService::new()).oneshot(request(None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(http::header::WWW_AUTHENTICATE));
        assert_eq!(body_message(resp).await, "Access denied. No token provided.");
    }

    #[tokio::test]
    async fn test_middleware_expired_token_returns_401() {
        let layer = AuthLayer::new(Arc::new(TestValidator), true);
        let resp = layer
            .layer(MockService::new())
            .oneshot(request(Some("Bearer old-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_message(resp).await, "Token expired. Please log in again.");
    }

    #[tokio::test]
    async fn test_middleware_invalid_token_returns_403() {
        let layer = AuthLayer::new(Arc::new(TestValidator), true);
        let resp = layer
            .layer(MockService::new())
            .oneshot(request(Some("Bearer bad-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_message(resp).await, "Invalid token.");
    }

    #[tokio::test]
    async fn test_middleware_valid_token_passes_and_injects_user() {
        let mock = MockService::new();
        let captured = mock.captured_user.clone();
        let layer = AuthLayer::new(Arc::new(TestValidator), true);

        let resp = layer
            .layer(mock)
            .oneshot(request(Some("Bearer valid-token")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let user = captured.lock().unwrap();
        let user = user.as_ref().expect("AuthenticatedUser should be present");
        assert_eq!(user.username, "admin");
    }
}
