//! Shared application state: every repository, constructed once from the
//! pool and injected into handlers through axum state.

use std::{fmt, sync::Arc};

use sqlx::PgPool;
use vitrine_core::database::repositories::{
    PostgresCatalogRepository, PostgresFavouriteRepository,
    PostgresImageRepository, PostgresPersonRepository, PostgresUserRepository,
};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub catalog: PostgresCatalogRepository,
    pub people: PostgresPersonRepository,
    pub images: PostgresImageRepository,
    pub favourites: PostgresFavouriteRepository,
    pub users: PostgresUserRepository,
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            catalog: PostgresCatalogRepository::new(pool.clone()),
            people: PostgresPersonRepository::new(pool.clone()),
            images: PostgresImageRepository::new(pool.clone()),
            favourites: PostgresFavouriteRepository::new(pool.clone()),
            users: PostgresUserRepository::new(pool),
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}
