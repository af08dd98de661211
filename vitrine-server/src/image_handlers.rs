//! Image relay endpoints.
//!
//! The engine only resolves which stored public path a request addresses;
//! the bytes come from the upstream image host and are passed through with
//! the upstream content-type.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use tracing::warn;
use vitrine_core::catalog::ImageRecord;

use crate::{
    AppState,
    errors::{AppError, AppResult},
};

/// `GET /image/{itemId}/thumb` — the item's thumbnail bytes.
pub async fn get_item_thumbnail(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<Response> {
    let image = state.images.thumbnail(&item_id).await?.ok_or_else(|| {
        AppError::not_found(format!("no thumbnail for item {item_id}"))
    })?;

    relay_image(&state, &image).await
}

/// `GET /image/{itemId}/{imageIndex}` — the Nth non-thumbnail image, 0-based
/// in the same order the item detail response numbers its image references.
pub async fn get_item_image(
    State(state): State<AppState>,
    Path((item_id, image_index)): Path<(String, u32)>,
) -> AppResult<Response> {
    let image = state
        .images
        .by_index(&item_id, i64::from(image_index))
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "no image {image_index} for item {item_id}"
            ))
        })?;

    relay_image(&state, &image).await
}

async fn relay_image(
    state: &AppState,
    image: &ImageRecord,
) -> AppResult<Response> {
    let url = format!(
        "{}{}",
        state.config.images.source_base_url, image.image_public_path
    );

    let upstream = state.http.get(&url).send().await.map_err(|e| {
        warn!(url = %url, error = %e, "image upstream unreachable");
        AppError::bad_gateway("image source did not respond")
    })?;

    if upstream.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(AppError::not_found(format!(
            "image {} is missing upstream",
            image.image_public_path
        )));
    }
    if !upstream.status().is_success() {
        warn!(url = %url, status = %upstream.status(), "image upstream error");
        return Err(AppError::bad_gateway("image source returned an error"));
    }

    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|_| AppError::bad_gateway("image source closed early"))?;

    let mut headers = HeaderMap::new();
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, content_type);
    }

    Ok((headers, bytes).into_response())
}
