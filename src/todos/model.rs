//! Todo data model — wire types for the HTTP surface.

use serde::{Deserialize, Serialize};

/// A persisted todo as it travels over the wire.
///
/// The id is the hex encoding of the store-assigned object id; the JSON key
/// stays `_id` for compatibility with existing clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    /// `true` = complete, `false` = incomplete.
    pub status: bool,
    pub body: String,
    pub category: String,
}

// Identity is the id alone.
impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Todo {}

/// An inbound creation payload, before validation.
///
/// The required fields are optional here so that an absent field reaches the
/// validator (and gets a proper violation message) instead of failing JSON
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodo {
    pub owner: Option<String>,
    #[serde(default)]
    pub status: bool,
    pub body: Option<String>,
    pub category: Option<String>,
}

/// A creation payload that has passed validation and is ready to persist.
/// The store assigns the id.
#[derive(Debug, Clone)]
pub struct TodoDraft {
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_id_as_underscore_id() {
        let todo = Todo {
            id: "588935f57546a2daea44de7c".to_string(),
            owner: "Blanche".to_string(),
            status: false,
            body: "Do the dishes".to_string(),
            category: "homework".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["_id"], "588935f57546a2daea44de7c");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn new_todo_status_defaults_to_incomplete() {
        let new: NewTodo =
            serde_json::from_str(r#"{"owner":"a","body":"b","category":"c"}"#).unwrap();
        assert!(!new.status);
        assert_eq!(new.owner.as_deref(), Some("a"));
    }

    #[test]
    fn new_todo_tolerates_missing_fields() {
        let new: NewTodo = serde_json::from_str(r#"{"status":true}"#).unwrap();
        assert!(new.status);
        assert!(new.owner.is_none());
        assert!(new.body.is_none());
        assert!(new.category.is_none());
    }

    #[test]
    fn todo_equality_is_by_id() {
        let a = Todo {
            id: "588935f57546a2daea44de7c".to_string(),
            owner: "Fry".to_string(),
            status: true,
            body: "x".to_string(),
            category: "video games".to_string(),
        };
        let mut b = a.clone();
        b.owner = "Leela".to_string();
        assert_eq!(a, b);
    }
}
