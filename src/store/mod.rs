//! Tutorial persistence. Handlers only see [`TutorialStore`]; the backend is chosen at startup.

mod memory;
mod postgres;

pub use memory::MemoryTutorialStore;
pub use postgres::{ensure_database_exists, ensure_tutorials_table, PgTutorialStore};

use crate::error::StoreError;
use crate::model::{NewTutorial, TutorialDocument, TutorialFilter, TutorialPatch};
use async_trait::async_trait;
use uuid::Uuid;

/// Document store for tutorials. Every call is one round trip; the backend
/// generates ids and maintains timestamps and the version counter.
#[async_trait]
pub trait TutorialStore: Send + Sync {
    async fn insert(&self, tutorial: NewTutorial) -> Result<TutorialDocument, StoreError>;

    /// Matching documents ordered by creation time, then id.
    async fn find(&self, filter: &TutorialFilter) -> Result<Vec<TutorialDocument>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TutorialDocument>, StoreError>;

    /// Applies the patch and returns the document as stored afterwards, or None if absent.
    async fn update_by_id(&self, id: Uuid, patch: &TutorialPatch) -> Result<Option<TutorialDocument>, StoreError>;

    /// Returns the removed document, or None if absent.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<TutorialDocument>, StoreError>;

    /// Removes every document; returns how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
