//! Backend-agnostic `TodoStore` trait — the single async interface the
//! HTTP layer talks to.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::todos::model::{Todo, TodoDraft};
use crate::todos::query::TodoQuery;

/// The document store, assumed safe for concurrent use by many request
/// handlers. Implementations apply filter and sort to the full record set
/// and the limit last.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// List todos matching the query.
    async fn find(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError>;

    /// Look up one todo by its id. `None` when no record matches.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Todo>, StoreError>;

    /// Persist a validated draft. Returns the generated hex id.
    async fn insert(&self, draft: TodoDraft) -> Result<String, StoreError>;
}
