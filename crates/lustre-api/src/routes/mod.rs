//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | banner |
//! | GET | `/health` | liveness and backend name |
//! | GET | `/api/search/search` | ranked product search |
//! | GET | `/api/search/suggestion` | typeahead suggestions |
//! | POST | `/api/auth/login` | admin login |
//! | POST | `/api/auth/verify-token` | refresh-token exchange |
//! | POST | `/api/auth/hash-password` | password hashing |
//! | GET | `/api/auth/me` | current user (bearer access token) |

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod search;

/// Assemble every route. Middleware is added by the server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/search", search::router())
        .nest("/api/auth", auth::router(&state))
        .with_state(state)
}
