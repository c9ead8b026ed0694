//! In-memory backend — the same filter/sort/limit semantics as the MongoDB
//! backend, over a `Vec` behind an async lock. Used in development when no
//! deployment is configured, and by the test suite.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::traits::TodoStore;
use crate::todos::model::{Todo, TodoDraft};
use crate::todos::query::{SortField, SortOrder, TodoFilter, TodoQuery};

/// Store holding todos in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The filter clauses compiled to matchers. Pattern values are escaped
/// before compilation, so they match as literal substrings.
struct CompiledFilter {
    owner: Option<regex::Regex>,
    category: Option<regex::Regex>,
    status: Option<bool>,
    body: Option<regex::Regex>,
}

impl CompiledFilter {
    fn compile(filter: &TodoFilter) -> Result<Self, StoreError> {
        Ok(Self {
            owner: filter
                .owner
                .as_deref()
                .map(case_insensitive_literal)
                .transpose()?,
            category: filter
                .category
                .as_deref()
                .map(case_insensitive_literal)
                .transpose()?,
            status: filter.status,
            body: filter
                .body_contains
                .as_deref()
                .map(case_sensitive_literal)
                .transpose()?,
        })
    }

    fn matches(&self, todo: &Todo) -> bool {
        self.owner.as_ref().is_none_or(|re| re.is_match(&todo.owner))
            && self
                .category
                .as_ref()
                .is_none_or(|re| re.is_match(&todo.category))
            && self.status.is_none_or(|status| todo.status == status)
            && self.body.as_ref().is_none_or(|re| re.is_match(&todo.body))
    }
}

fn case_insensitive_literal(value: &str) -> Result<regex::Regex, StoreError> {
    regex::Regex::new(&format!("(?i){}", regex::escape(value)))
        .map_err(|e| StoreError::Query(e.to_string()))
}

fn case_sensitive_literal(value: &str) -> Result<regex::Regex, StoreError> {
    regex::Regex::new(&regex::escape(value)).map_err(|e| StoreError::Query(e.to_string()))
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError> {
        let filter = CompiledFilter::compile(&query.filter)?;
        let todos = self.todos.read().await;
        let mut matching: Vec<Todo> = todos
            .iter()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect();

        // Stable sort keeps ties in insertion order. The limit trims the
        // already-sorted set, never the other way around.
        matching.sort_by(|a, b| {
            let ordering = match query.sort.field {
                SortField::Owner => a.owner.cmp(&b.owner),
                SortField::Body => a.body.cmp(&b.body),
                SortField::Status => a.status.cmp(&b.status),
                SortField::Category => a.category.cmp(&b.category),
            };
            match query.sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        if let Some(limit) = query.limit {
            matching.truncate(limit as usize);
        }
        Ok(matching)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Todo>, StoreError> {
        let hex = id.to_hex();
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|todo| todo.id == hex).cloned())
    }

    async fn insert(&self, draft: TodoDraft) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        self.todos.write().await.push(Todo {
            id: id.clone(),
            owner: draft.owner,
            status: draft.status,
            body: draft.body,
            category: draft.category,
        });
        Ok(id)
    }
}
