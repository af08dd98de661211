//! Postgres access: connection helper, SQL rendering, repositories.

pub mod render;
pub mod repositories;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::Result;

/// Connect a bounded pool to the catalog store.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}
