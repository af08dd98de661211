//! Person detail endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::{envelope::Document, serialize},
    errors::{AppError, AppResult},
};

/// `GET /person/{personId}` — the person record plus the items they made or
/// are associated with, merged and capped like every related-items response.
pub async fn get_person(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> AppResult<Json<Document>> {
    let person = state.people.find(&person_id).await?.ok_or_else(|| {
        AppError::not_found(format!("no person with id {person_id}"))
    })?;

    let related = state.catalog.related_to_person(&person.id).await?;

    Ok(Json(serialize::person_detail_document(&person, &related)))
}
