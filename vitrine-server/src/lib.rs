//! Axum application for the Vitrine catalog service.

pub mod api;
pub mod errors;
pub mod image_handlers;
pub mod infra;
pub mod item_handlers;
pub mod person_handlers;
pub mod routes;
pub mod search_handlers;
pub mod users;

pub use infra::app_state::AppState;
