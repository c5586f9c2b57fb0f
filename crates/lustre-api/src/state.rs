//! Shared handler state.

use std::sync::Arc;

use lustre_auth::{AdminAuth, AuthSettings};
use lustre_search::{SearchConfig, SearchIndex, SearchService};

/// State cloned into every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub search: SearchService,
    pub auth: Arc<AdminAuth>,
    pub auth_enabled: bool,
}

impl AppState {
    pub fn new(index: Arc<dyn SearchIndex>, search: &SearchConfig, auth: &AuthSettings) -> Self {
        Self {
            search: SearchService::new(index, search),
            auth: Arc::new(AdminAuth::new(auth)),
            auth_enabled: auth.enabled,
        }
    }
}
