//! Project search handler.
//!
//! GET /api/projects — public keyword/attribute search over listings.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

use crate::AppState;
use crate::models::error::ApiError;
use crate::models::project::ProjectResponse;
use crate::models::search::{SearchQuery, SearchResponse};
use crate::services::search;

/// Search project listings
///
/// GET /api/projects
///
/// # Query Parameters
///
/// - `q` - free text matched against title, description or location
/// - `min_irr` - keep listings with irr >= threshold
/// - `location_type` - exact categorical match
/// - `locations` - comma-separated location set
/// - `limit` / `offset` - optional pagination (limit 1-100)
///
/// All criteria are optional and ANDed; an empty query returns every
/// listing. Results are ordered newest first.
pub async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    query.validate().map_err(ApiError::Validation)?;

    let (rows, total) = search::search_projects(&state.db, &query).await?;
    let locations = search::distinct_locations(&state.db).await?;

    info!(
        returned = rows.len(),
        total = total,
        q = query.text().unwrap_or_default(),
        "search completed"
    );

    Ok(Json(SearchResponse {
        projects: rows.into_iter().map(ProjectResponse::from).collect(),
        total,
        locations,
    }))
}
