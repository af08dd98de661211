//! Favourite link rows: the engine's only write path.
//!
//! Creates are single atomic inserts; a duplicate pair surfaces the unique
//! violation as a conflict rather than upserting, and an unknown target id
//! surfaces the foreign-key violation as not-found.

use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::{ItemFavourite, PersonFavourite};
use crate::error::{CatalogError, Result};

#[derive(Clone, Debug)]
pub struct PostgresFavouriteRepository {
    pool: PgPool,
}

impl PostgresFavouriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn item_favourites(
        &self,
        user_id: Uuid,
        item_id: Option<&str>,
    ) -> Result<Vec<ItemFavourite>> {
        let favourites = match item_id {
            Some(item_id) => {
                sqlx::query_as(
                    "SELECT user_id, item_id FROM user_item_favourite \
                     WHERE user_id = $1 AND item_id = $2",
                )
                .bind(user_id)
                .bind(item_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT user_id, item_id FROM user_item_favourite \
                     WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(favourites)
    }

    pub async fn add_item_favourite(
        &self,
        user_id: Uuid,
        item_id: &str,
    ) -> Result<ItemFavourite> {
        sqlx::query_as(
            "INSERT INTO user_item_favourite (user_id, item_id) \
             VALUES ($1, $2) \
             RETURNING user_id, item_id",
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "item", item_id))
    }

    pub async fn remove_item_favourite(
        &self,
        user_id: Uuid,
        item_id: &str,
    ) -> Result<()> {
        sqlx::query(
            "DELETE FROM user_item_favourite \
             WHERE user_id = $1 AND item_id = $2",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn person_favourites(
        &self,
        user_id: Uuid,
        person_id: Option<&str>,
    ) -> Result<Vec<PersonFavourite>> {
        let favourites = match person_id {
            Some(person_id) => {
                sqlx::query_as(
                    "SELECT user_id, person_id FROM user_person_favourite \
                     WHERE user_id = $1 AND person_id = $2",
                )
                .bind(user_id)
                .bind(person_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT user_id, person_id FROM user_person_favourite \
                     WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(favourites)
    }

    pub async fn add_person_favourite(
        &self,
        user_id: Uuid,
        person_id: &str,
    ) -> Result<PersonFavourite> {
        sqlx::query_as(
            "INSERT INTO user_person_favourite (user_id, person_id) \
             VALUES ($1, $2) \
             RETURNING user_id, person_id",
        )
        .bind(user_id)
        .bind(person_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "person", person_id))
    }

    pub async fn remove_person_favourite(
        &self,
        user_id: Uuid,
        person_id: &str,
    ) -> Result<()> {
        sqlx::query(
            "DELETE FROM user_person_favourite \
             WHERE user_id = $1 AND person_id = $2",
        )
        .bind(user_id)
        .bind(person_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn constraint_error(
    error: sqlx::Error,
    kind: &str,
    target_id: &str,
) -> CatalogError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            CatalogError::Conflict(format!(
                "{kind} {target_id} is already a favourite"
            ))
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            CatalogError::NotFound(format!("no {kind} with id {target_id}"))
        }
        _ => CatalogError::Database(error),
    }
}
