//! Favourite items and people for the authenticated user.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::auth::middleware::CurrentUser;
use crate::{
    AppState,
    api::{envelope::Document, serialize},
    errors::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFavouriteQuery {
    pub item_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFavouriteQuery {
    pub person_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteItemRequest {
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouritePersonRequest {
    pub person_id: String,
}

/// `GET /favourite/item[?itemId=]` — the user's favourite items, optionally
/// narrowed to one id. An empty list is a 404.
pub async fn list_item_favourites(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<ItemFavouriteQuery>,
) -> AppResult<Json<Document>> {
    let favourites = state
        .favourites
        .item_favourites(user.id, query.item_id.as_deref())
        .await?;

    if favourites.is_empty() {
        return Err(AppError::not_found("no favourite items"));
    }

    Ok(Json(serialize::item_favourite_list_document(&favourites)))
}

/// `POST /favourite/item` — add one favourite. A duplicate pair is a 409.
pub async fn add_item_favourite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<FavouriteItemRequest>,
) -> AppResult<Json<Document>> {
    let favourite = state
        .favourites
        .add_item_favourite(user.id, &request.item_id)
        .await?;

    Ok(Json(Document::one(serialize::item_favourite_resource(
        &favourite,
    ))))
}

/// `DELETE /favourite/item/{itemId}`.
pub async fn remove_item_favourite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(item_id): Path<String>,
) -> AppResult<StatusCode> {
    state
        .favourites
        .remove_item_favourite(user.id, &item_id)
        .await?;
    Ok(StatusCode::OK)
}

/// `GET /favourite/person[?personId=]`.
pub async fn list_person_favourites(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PersonFavouriteQuery>,
) -> AppResult<Json<Document>> {
    let favourites = state
        .favourites
        .person_favourites(user.id, query.person_id.as_deref())
        .await?;

    if favourites.is_empty() {
        return Err(AppError::not_found("no favourite people"));
    }

    Ok(Json(serialize::person_favourite_list_document(&favourites)))
}

/// `POST /favourite/person`.
pub async fn add_person_favourite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<FavouritePersonRequest>,
) -> AppResult<Json<Document>> {
    let favourite = state
        .favourites
        .add_person_favourite(user.id, &request.person_id)
        .await?;

    Ok(Json(Document::one(serialize::person_favourite_resource(
        &favourite,
    ))))
}

/// `DELETE /favourite/person/{personId}`.
pub async fn remove_person_favourite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(person_id): Path<String>,
) -> AppResult<StatusCode> {
    state
        .favourites
        .remove_person_favourite(user.id, &person_id)
        .await?;
    Ok(StatusCode::OK)
}
