//! User account storage for the favourites feature.

use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::User;
use crate::error::{CatalogError, Result};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, administrator";

#[derive(Clone, Debug)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users \
               (id, first_name, last_name, email, password_hash, \
                administrator) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.administrator)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CatalogError::Conflict(format!(
                    "an account already exists for {}",
                    user.email
                ))
            }
            _ => CatalogError::Database(e),
        })?;
        Ok(())
    }
}
