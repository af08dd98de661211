//! Image record lookups for the relay endpoint.
//!
//! The by-index lookup addresses the Nth non-thumbnail image in the same
//! stable order the detail response uses for its reference identifiers.

use sqlx::PgPool;

use crate::catalog::ImageRecord;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn thumbnail(
        &self,
        item_id: &str,
    ) -> Result<Option<ImageRecord>> {
        let image = sqlx::query_as(
            "SELECT item_id, image_public_path, is_thumb \
             FROM collections_item_image \
             WHERE item_id = $1 AND is_thumb \
             LIMIT 1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(image)
    }

    pub async fn by_index(
        &self,
        item_id: &str,
        index: i64,
    ) -> Result<Option<ImageRecord>> {
        let image = sqlx::query_as(
            "SELECT item_id, image_public_path, is_thumb \
             FROM collections_item_image \
             WHERE item_id = $1 AND NOT is_thumb \
             ORDER BY image_public_path \
             OFFSET $2 LIMIT 1",
        )
        .bind(item_id)
        .bind(index)
        .fetch_optional(&self.pool)
        .await?;
        Ok(image)
    }
}
