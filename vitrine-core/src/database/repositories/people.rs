//! Person lookups.

use sqlx::PgPool;

use crate::catalog::Person;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct PostgresPersonRepository {
    pool: PgPool,
}

impl PostgresPersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, person_id: &str) -> Result<Option<Person>> {
        let person = sqlx::query_as(
            "SELECT id, name, birth_date, death_date, occupation, \
                    nationality, note, description, collections_url \
             FROM collections_person \
             WHERE id = $1",
        )
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(person)
    }
}
