//! Tutorial routes, mounted under [`super::BASE_PATH`].
//! `/published` is registered ahead of `/:id` so the literal segment never reaches the id handler.

use crate::handlers::tutorial::{create, delete, delete_all, list, list_published, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn tutorial_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create).delete(delete_all))
        .route("/published", get(list_published))
        .route("/:id", get(read).put(update).delete(delete))
        .with_state(state)
}
