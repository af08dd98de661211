pub mod auth;
pub mod favourite_handlers;
