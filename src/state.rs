//! Shared application state for all routes.

use crate::store::TutorialStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected at startup; handlers never reach for a global connection.
    pub store: Arc<dyn TutorialStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: TutorialStore + 'static,
    {
        Self { store: Arc::new(store) }
    }
}
