//! MongoDB backend — translates a `TodoQuery` into bson filter and sort
//! documents and runs them through the driver.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, Regex, doc};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::error::StoreError;
use crate::store::traits::TodoStore;
use crate::todos::model::{Todo, TodoDraft};
use crate::todos::query::{Sort, SortOrder, TodoFilter, TodoQuery};

/// A todo as stored in the collection (`_id` is a real ObjectId there).
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    owner: String,
    status: bool,
    body: String,
    category: String,
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Todo {
            id: doc.id.to_hex(),
            owner: doc.owner,
            status: doc.status,
            body: doc.body,
            category: doc.category,
        }
    }
}

/// Store backed by a MongoDB collection.
pub struct MongoStore {
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Connect to the configured deployment.
    pub async fn connect(uri: &str, config: &ServerConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let collection = client
            .database(&config.database)
            .collection(&config.collection);
        Ok(Self { collection })
    }
}

/// An escaped-literal pattern clause: the value matches as an exact
/// substring, never as a regex the caller controls.
fn literal_regex(value: &str, options: &str) -> Bson {
    Bson::RegularExpression(Regex {
        pattern: regex::escape(value),
        options: options.to_string(),
    })
}

/// Fold the optional clauses into one AND-combined filter document.
/// No clauses means the unrestricted set.
fn filter_document(filter: &TodoFilter) -> Document {
    let mut clauses = Vec::new();

    if let Some(owner) = &filter.owner {
        clauses.push(doc! { "owner": literal_regex(owner, "i") });
    }
    if let Some(category) = &filter.category {
        clauses.push(doc! { "category": literal_regex(category, "i") });
    }
    if let Some(status) = filter.status {
        clauses.push(doc! { "status": status });
    }
    if let Some(contains) = &filter.body_contains {
        // Case-sensitive, unlike owner/category.
        clauses.push(doc! { "body": literal_regex(contains, "") });
    }

    if clauses.is_empty() {
        Document::new()
    } else {
        doc! { "$and": clauses }
    }
}

fn sort_document(sort: &Sort) -> Document {
    let direction = match sort.order {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    };
    let mut document = Document::new();
    document.insert(sort.field.as_str(), direction);
    document
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn find(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError> {
        let mut find = self
            .collection
            .find(filter_document(&query.filter))
            .sort(sort_document(&query.sort));
        // Sort runs server-side over the full filtered set; the limit only
        // trims the already-ordered cursor.
        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }
        let documents: Vec<TodoDocument> = find.await?.try_collect().await?;
        Ok(documents.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Todo>, StoreError> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Todo::from))
    }

    async fn insert(&self, draft: TodoDraft) -> Result<String, StoreError> {
        let document = TodoDocument {
            id: ObjectId::new(),
            owner: draft.owner,
            status: draft.status,
            body: draft.body,
            category: draft.category,
        };
        self.collection.insert_one(&document).await?;
        Ok(document.id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::query::SortField;

    fn regex_clause<'a>(document: &'a Document, index: usize, field: &str) -> &'a Regex {
        let clauses = document.get_array("$and").unwrap();
        let clause = clauses[index].as_document().unwrap();
        match clause.get(field) {
            Some(Bson::RegularExpression(re)) => re,
            other => panic!("expected regex clause for {field}, got {other:?}"),
        }
    }

    #[test]
    fn empty_filter_is_the_empty_document() {
        assert_eq!(filter_document(&TodoFilter::default()), Document::new());
    }

    #[test]
    fn owner_and_category_clauses_are_case_insensitive() {
        let filter = TodoFilter {
            owner: Some("Blanche".to_string()),
            category: Some("homework".to_string()),
            ..Default::default()
        };
        let document = filter_document(&filter);
        let owner = regex_clause(&document, 0, "owner");
        assert_eq!(owner.pattern, "Blanche");
        assert_eq!(owner.options, "i");
        let category = regex_clause(&document, 1, "category");
        assert_eq!(category.pattern, "homework");
        assert_eq!(category.options, "i");
    }

    #[test]
    fn contains_clause_is_case_sensitive() {
        let filter = TodoFilter {
            body_contains: Some("banana".to_string()),
            ..Default::default()
        };
        let document = filter_document(&filter);
        let body = regex_clause(&document, 0, "body");
        assert_eq!(body.pattern, "banana");
        assert_eq!(body.options, "");
    }

    #[test]
    fn pattern_values_are_escaped_literals() {
        let filter = TodoFilter {
            owner: Some("a.c*".to_string()),
            ..Default::default()
        };
        let document = filter_document(&filter);
        assert_eq!(regex_clause(&document, 0, "owner").pattern, r"a\.c\*");
    }

    #[test]
    fn status_clause_is_a_plain_boolean_eq() {
        let filter = TodoFilter {
            status: Some(true),
            ..Default::default()
        };
        let document = filter_document(&filter);
        let clauses = document.get_array("$and").unwrap();
        assert_eq!(
            clauses[0].as_document().unwrap().get_bool("status").unwrap(),
            true
        );
    }

    #[test]
    fn clauses_combine_in_declaration_order() {
        let filter = TodoFilter {
            owner: Some("o".to_string()),
            category: Some("c".to_string()),
            status: Some(false),
            body_contains: Some("b".to_string()),
        };
        let document = filter_document(&filter);
        assert_eq!(document.get_array("$and").unwrap().len(), 4);
    }

    #[test]
    fn sort_documents_map_order_to_direction() {
        let asc = sort_document(&Sort {
            field: SortField::Owner,
            order: SortOrder::Asc,
        });
        assert_eq!(asc, doc! { "owner": 1 });

        let desc = sort_document(&Sort {
            field: SortField::Category,
            order: SortOrder::Desc,
        });
        assert_eq!(desc, doc! { "category": -1 });
    }
}
