//! Router assembly.

mod common;
mod tutorial;

pub use common::{common_routes, GREETING};
pub use tutorial::tutorial_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Mount point of the tutorial resource.
pub const BASE_PATH: &str = "/api/tutorials";

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: common routes, tutorial routes under [`BASE_PATH`], CORS for any origin,
/// a request body cap and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .nest(BASE_PATH, tutorial_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
