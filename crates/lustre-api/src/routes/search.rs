//! Search and suggestion handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use lustre_search::{ProductDocument, SuggestionResponse};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::{Error, Result};

pub const SEARCH_MESSAGE: &str = "Search successful";
pub const SUGGESTION_MESSAGE: &str = "Search suggestions fetched successfully";

/// Query string for both endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchBody {
    pub message: &'static str,
    pub count: usize,
    pub data: Vec<ProductDocument>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionBody {
    pub message: &'static str,
    #[serde(flatten)]
    pub suggestions: SuggestionResponse,
}

impl QueryParams {
    /// Unwrap the extractor, turning a malformed query string into a JSON 400.
    fn from_extracted(extracted: std::result::Result<Query<Self>, QueryRejection>) -> Result<Self> {
        extracted
            .map(|Query(params)| params)
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/suggestion", get(suggestion))
}

async fn search(
    State(state): State<AppState>,
    params: std::result::Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<SearchBody>> {
    let params = QueryParams::from_extracted(params)?;
    let results = state.search.search(params.query.as_deref()).await?;
    tracing::debug!(query = ?params.query, count = results.count, "search");
    Ok(Json(SearchBody {
        message: SEARCH_MESSAGE,
        count: results.count,
        data: results.data,
    }))
}

async fn suggestion(
    State(state): State<AppState>,
    params: std::result::Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<SuggestionBody>> {
    let params = QueryParams::from_extracted(params)?;
    let suggestions = state.search.suggest(params.query.as_deref()).await?;
    tracing::debug!(
        query = ?params.query,
        suggested = suggestions.words().len(),
        "suggestion"
    );
    Ok(Json(SuggestionBody {
        message: SUGGESTION_MESSAGE,
        suggestions,
    }))
}
