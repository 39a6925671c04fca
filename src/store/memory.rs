//! In-process backend with the same semantics as the PostgreSQL store.

use super::TutorialStore;
use crate::error::StoreError;
use crate::model::{NewTutorial, TutorialDocument, TutorialFilter, TutorialPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryTutorialStore {
    docs: RwLock<HashMap<Uuid, TutorialDocument>>,
}

impl MemoryTutorialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, TutorialDocument>>, StoreError> {
        self.docs
            .read()
            .map_err(|_| StoreError::Unavailable("tutorial store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, TutorialDocument>>, StoreError> {
        self.docs
            .write()
            .map_err(|_| StoreError::Unavailable("tutorial store lock poisoned".into()))
    }
}

#[async_trait]
impl TutorialStore for MemoryTutorialStore {
    async fn insert(&self, tutorial: NewTutorial) -> Result<TutorialDocument, StoreError> {
        let mut docs = self.write()?;
        let mut id = Uuid::new_v4();
        while docs.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let now = Utc::now();
        let doc = TutorialDocument {
            id,
            title: tutorial.title,
            description: tutorial.description,
            published: tutorial.published,
            created_at: now,
            updated_at: now,
            version: 0,
        };
        docs.insert(id, doc.clone());
        Ok(doc)
    }

    async fn find(&self, filter: &TutorialFilter) -> Result<Vec<TutorialDocument>, StoreError> {
        let docs = self.read()?;
        let mut out: Vec<TutorialDocument> = docs.values().filter(|d| filter.matches(d)).cloned().collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TutorialDocument>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, patch: &TutorialPatch) -> Result<Option<TutorialDocument>, StoreError> {
        let mut docs = self.write()?;
        let Some(doc) = docs.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(doc);
        doc.updated_at = Utc::now();
        doc.version += 1;
        Ok(Some(doc.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<TutorialDocument>, StoreError> {
        Ok(self.write()?.remove(&id))
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut docs = self.write()?;
        let count = docs.len() as u64;
        docs.clear();
        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tutorial(title: &str, published: bool) -> NewTutorial {
        NewTutorial {
            title: title.into(),
            description: None,
            published,
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_timestamps() {
        let store = MemoryTutorialStore::new();
        let a = store.insert(new_tutorial("A", false)).await.unwrap();
        let b = store.insert(new_tutorial("A", false)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.version, 0);
    }

    #[tokio::test]
    async fn update_bumps_version_and_updated_at() {
        let store = MemoryTutorialStore::new();
        let doc = store.insert(new_tutorial("A", false)).await.unwrap();
        let patch = TutorialPatch {
            title: Some("B".into()),
            ..Default::default()
        };
        let updated = store.update_by_id(doc.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "B");
        assert_eq!(updated.version, 1);
        assert!(updated.updated_at >= doc.updated_at);
        assert_eq!(updated.created_at, doc.created_at);

        assert!(store.update_by_id(Uuid::new_v4(), &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_applies_filter() {
        let store = MemoryTutorialStore::new();
        store.insert(new_tutorial("Node.js Guide", true)).await.unwrap();
        store.insert(new_tutorial("React", false)).await.unwrap();
        let published = store.find(&TutorialFilter::published()).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Node.js Guide");
        assert_eq!(store.find(&TutorialFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let store = MemoryTutorialStore::new();
        store.insert(new_tutorial("A", false)).await.unwrap();
        store.insert(new_tutorial("B", false)).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }
}
