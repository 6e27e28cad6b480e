use anyhow::{Context, Result};
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{generate_id, Document, Id};
use crate::store::traits::{DocumentStore, Store};

#[derive(Debug)]
struct StoredDocument {
    sequence: u64,
    body: serde_json::Value,
}

/// Process-local document store. Documents are kept as JSON so they go
/// through the same serialization as the Postgres store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, HashMap<Id, StoredDocument>>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in the collection of `D`
    pub fn count<D: Document>(&self) -> usize {
        self.collections
            .read()
            .get(D::COLLECTION)
            .map(|documents| documents.len())
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn save<D: Document>(&self, mut document: D) -> Result<D> {
        let id = match document.id() {
            Some(id) => id.clone(),
            None => {
                let id = generate_id();
                document.set_id(id.clone());
                id
            }
        };
        let body = serde_json::to_value(&document)
            .with_context(|| format!("Failed to serialize {} {}", D::ENTITY_NAME, id))?;

        let mut collections = self.collections.write();
        let documents = collections.entry(D::COLLECTION).or_default();
        // Overwrites keep their original position in find_all
        let sequence = match documents.get(&id) {
            Some(existing) => existing.sequence,
            None => self.sequence.fetch_add(1, Ordering::Relaxed),
        };
        documents.insert(id.clone(), StoredDocument { sequence, body });
        log::debug!("Saved {} {} in memory", D::ENTITY_NAME, id);

        Ok(document)
    }

    async fn find_by_id<D: Document>(&self, id: &Id) -> Result<Option<D>> {
        let collections = self.collections.read();
        let Some(stored) = collections
            .get(D::COLLECTION)
            .and_then(|documents| documents.get(id))
        else {
            return Ok(None);
        };

        let document = serde_json::from_value(stored.body.clone())
            .with_context(|| format!("Failed to decode {} {}", D::ENTITY_NAME, id))?;
        Ok(Some(document))
    }

    async fn find_all<D: Document>(&self) -> Result<Vec<D>> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(D::COLLECTION) else {
            return Ok(Vec::new());
        };

        documents
            .values()
            .sorted_by_key(|stored| stored.sequence)
            .map(|stored| {
                serde_json::from_value(stored.body.clone())
                    .with_context(|| format!("Failed to decode {}", D::ENTITY_NAME))
            })
            .collect()
    }

    async fn exists_by_id<D: Document>(&self, id: &Id) -> Result<bool> {
        Ok(self
            .collections
            .read()
            .get(D::COLLECTION)
            .is_some_and(|documents| documents.contains_key(id)))
    }

    async fn delete_by_id<D: Document>(&self, id: &Id) -> Result<()> {
        let removed = self
            .collections
            .write()
            .get_mut(D::COLLECTION)
            .and_then(|documents| documents.remove(id));
        if removed.is_none() {
            log::debug!("Delete of missing {} {} ignored", D::ENTITY_NAME, id);
        }
        Ok(())
    }
}

impl Store for MemoryStore {}
