use crate::model::{Document, Id};
use anyhow::Result;

/// Keyed persistence for documents, one collection per document type.
///
/// There are no joins: a document's references are stored as identifiers and
/// resolved by the caller.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or overwrite a document. A document without an identifier gets a
    /// freshly generated one; the stored document is returned.
    async fn save<D: Document>(&self, document: D) -> Result<D>;
    /// Fetch one document by identifier
    async fn find_by_id<D: Document>(&self, id: &Id) -> Result<Option<D>>;
    /// Every document of the collection, oldest first
    async fn find_all<D: Document>(&self) -> Result<Vec<D>>;
    async fn exists_by_id<D: Document>(&self, id: &Id) -> Result<bool>;
    /// Remove a document. Referenced documents are left untouched and a
    /// missing identifier is not an error.
    async fn delete_by_id<D: Document>(&self, id: &Id) -> Result<()>;
}

pub trait Store: DocumentStore + Send + Sync {}
