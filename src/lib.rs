//! Tutorial service: REST CRUD for Tutorial records over a pluggable document store.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{ServiceConfig, StoreKind};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{to_api_shape, Tutorial, TutorialDocument};
pub use routes::{app, common_routes, tutorial_routes, BASE_PATH};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tutorials_table, MemoryTutorialStore, PgTutorialStore, TutorialStore};
