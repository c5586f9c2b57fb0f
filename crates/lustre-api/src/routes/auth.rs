//! Admin authentication handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use lustre_auth::{
    extract_bearer_token, hash_password, user_from_parts, AuthError, AuthLayer, LoginGrant,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::{Error, Result};

pub const LOGIN_MESSAGE: &str = "Login successful";
pub const TOKEN_VALID_MESSAGE: &str = "Token is valid";
pub const NO_TOKEN_MESSAGE: &str = "No token provided";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "Password is required";

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub message: &'static str,
    #[serde(flatten)]
    pub grant: LoginGrant,
}

#[derive(Debug, Default, Deserialize)]
pub struct HashPasswordRequest {
    pub password: Option<String>,
}

pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .layer(AuthLayer::new(Arc::clone(&state.auth), state.auth_enabled));

    Router::new()
        .route("/login", post(login))
        .route("/verify-token", post(verify_token))
        .route("/hash-password", post(hash))
        .merge(protected)
}

async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Result<Json<LoginBody>> {
    // Argon2 verification is CPU-bound
    let auth = Arc::clone(&state.auth);
    let grant = tokio::task::spawn_blocking(move || auth.login(&req.email, &req.password))
        .await
        .map_err(|e| Error::Server(format!("login task failed: {e}")))??;
    Ok(Json(LoginBody {
        message: LOGIN_MESSAGE,
        grant,
    }))
}

async fn verify_token(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| Error::Unauthorized(NO_TOKEN_MESSAGE.to_string()))?;

    let grant = state.auth.refresh(token).map_err(|e| match e {
        AuthError::Hashing(_) | AuthError::Signing(_) => Error::Auth(e),
        other => {
            tracing::debug!("refresh rejected: {other}");
            Error::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
        }
    })?;

    Ok(Json(json!({
        "message": TOKEN_VALID_MESSAGE,
        "access": grant.access,
        "user": grant.user,
    })))
}

async fn hash(Json(req): Json<HashPasswordRequest>) -> Result<Json<Value>> {
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::BadRequest(PASSWORD_REQUIRED_MESSAGE.to_string()))?;

    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::Server(format!("hashing task failed: {e}")))??;

    Ok(Json(json!({ "hashedPassword": hashed })))
}

async fn me(parts: Parts) -> Json<Value> {
    // No user is attached when auth is disabled
    Json(json!({ "user": user_from_parts(&parts) }))
}
