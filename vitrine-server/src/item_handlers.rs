//! Item detail endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::{envelope::Document, serialize},
    errors::{AppError, AppResult},
};

/// `GET /item/{itemId}` — the item with all of its relations, plus up to
/// four related items in `meta`. A missing id terminates the request before
/// any related-item work.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<Document>> {
    let detail = state.catalog.item_detail(&item_id).await?.ok_or_else(|| {
        AppError::not_found(format!("no item with id {item_id}"))
    })?;

    let related = state.catalog.related_to_item(&detail).await?;

    Ok(Json(serialize::item_detail_document(&detail, &related)))
}
