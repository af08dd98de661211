//! Faceted search endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::debug;
use vitrine_core::query::{Page, SearchFacets, SortCode};

use crate::{
    AppState,
    api::{envelope::Document, serialize},
    errors::AppResult,
};

/// `GET /search` — translate the raw facet parameters into one relational
/// query and reply with the matching page plus the total count.
pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Document>> {
    let facets = SearchFacets::from_pairs(&pairs)?;
    let sort = SortCode::from_pairs(&pairs)?;
    let page = Page::from_pairs(&pairs)?;

    debug!(?facets, ?sort, ?page, "search request");

    let results = state.catalog.search(&facets, sort, page).await?;

    Ok(Json(serialize::search_document(&results)))
}
