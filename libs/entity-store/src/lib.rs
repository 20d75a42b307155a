//! Generic entity repository used by every resource service.
//!
//! The auth fabric treats storage as a thin collaborator: a repository with
//! `create`/`get`/`list`/`update`/`delete` that signals duplicates and
//! missing records distinctly from any other failure. Services keep their
//! records in an in-memory [`MemoryStore`] behind this contract.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository failures, kept distinct so handlers can map duplicates to a
/// conflict status and missing records to not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate key")]
    DuplicateKey,
}

/// A record the generic store can hold.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// Value that must be unique across all records of this type (an email,
    /// a course code, a composite key). `None` disables the check.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// In-memory repository guarded by an async lock; each request task takes
/// the lock only for the duration of one operation.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T: StoredEntity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id()) {
            return Err(StoreError::DuplicateKey);
        }
        if let Some(key) = record.unique_key() {
            if records.values().any(|existing| {
                existing.unique_key().as_deref() == Some(key.as_str())
            }) {
                return Err(StoreError::DuplicateKey);
            }
        }
        records.insert(record.id(), record.clone());
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<T, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    /// Replace the record stored under `id`. The replacement keeps `id`
    /// regardless of what the caller put in the record.
    pub async fn update(&self, id: Uuid, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(key) = record.unique_key() {
            if records.iter().any(|(other_id, existing)| {
                *other_id != id && existing.unique_key().as_deref() == Some(key.as_str())
            }) {
                return Err(StoreError::DuplicateKey);
            }
        }
        records.insert(id, record.clone());
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<T, StoreError> {
        self.records.write().await.remove(&id).ok_or(StoreError::NotFound)
    }
}

impl<T: StoredEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: Uuid,
        email: String,
    }

    impl StoredEntity for Record {
        fn id(&self) -> Uuid {
            self.id
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.email.clone())
        }
    }

    fn record(email: &str) -> Record {
        Record {
            id: Uuid::new_v4(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::new();
        let created = store.create(record("a@x.com")).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_unique_key_is_rejected() {
        let store = MemoryStore::new();
        store.create(record("a@x.com")).await.unwrap();
        let err = store.create(record("a@x.com")).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateKey);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store: MemoryStore<Record> = MemoryStore::new();
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap_err(), StoreError::NotFound);
    }

    #[tokio::test]
    async fn update_replaces_and_checks_uniqueness() {
        let store = MemoryStore::new();
        let first = store.create(record("a@x.com")).await.unwrap();
        let second = store.create(record("b@x.com")).await.unwrap();

        // Renaming second onto first's email must conflict.
        let clash = Record {
            id: second.id,
            email: "a@x.com".to_string(),
        };
        assert_eq!(
            store.update(second.id, clash).await.unwrap_err(),
            StoreError::DuplicateKey
        );

        // Updating a record to its own current key is fine.
        let same = Record {
            id: first.id,
            email: "a@x.com".to_string(),
        };
        assert!(store.update(first.id, same).await.is_ok());

        // Updating a missing record is not-found.
        assert_eq!(
            store.update(Uuid::new_v4(), record("c@x.com")).await.unwrap_err(),
            StoreError::NotFound
        );
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let store = MemoryStore::new();
        let created = store.create(record("a@x.com")).await.unwrap();
        let removed = store.delete(created.id).await.unwrap();
        assert_eq!(removed, created);
        assert_eq!(store.delete(created.id).await.unwrap_err(), StoreError::NotFound);
        assert!(store.list().await.unwrap().is_empty());
    }
}
