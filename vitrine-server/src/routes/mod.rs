//! Route table for the service.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::{
    AppState, image_handlers, item_handlers, person_handlers,
    search_handlers,
    users::{auth, favourite_handlers},
};

/// Assemble the full router: the public catalog surface plus the
/// bearer-protected account routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Catalog endpoints
        .route("/search", get(search_handlers::search))
        .route("/item/{item_id}", get(item_handlers::get_item))
        .route("/person/{person_id}", get(person_handlers::get_person))
        .route(
            "/image/{item_id}/thumb",
            get(image_handlers::get_item_thumbnail),
        )
        .route(
            "/image/{item_id}/{image_index}",
            get(image_handlers::get_item_image),
        )
        // Public account endpoints
        .route("/signup", post(auth::handlers::signup))
        .route("/login", post(auth::handlers::login))
        // Protected account endpoints
        .merge(create_protected_routes(state.clone()))
        .with_state(state)
}

fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(auth::handlers::logout))
        .route("/profile", get(auth::handlers::profile))
        .route(
            "/favourite/item",
            get(favourite_handlers::list_item_favourites)
                .post(favourite_handlers::add_item_favourite),
        )
        .route(
            "/favourite/item/{item_id}",
            delete(favourite_handlers::remove_item_favourite),
        )
        .route(
            "/favourite/person",
            get(favourite_handlers::list_person_favourites)
                .post(favourite_handlers::add_person_favourite),
        )
        .route(
            "/favourite/person/{person_id}",
            delete(favourite_handlers::remove_person_favourite),
        )
        .layer(middleware::from_fn_with_state(
            state,
            auth::middleware::auth_middleware,
        ))
}
