//! Creation-time validation — a declarative rule list evaluated in full.
//!
//! Every rule runs regardless of earlier failures so one error report can
//! describe all problems at once, in rule-declaration order.

use crate::error::ApiError;
use crate::todos::model::{NewTodo, TodoDraft};

type Rule = (fn(&NewTodo) -> bool, &'static str);

const RULES: [Rule; 3] = [
    (has_owner, "Todo must have a non-empty todo owner"),
    (has_body, "Todo must have a non-empty todo body"),
    (has_category, "Todo must have a non-empty todo category"),
];

fn has_owner(todo: &NewTodo) -> bool {
    todo.owner.as_deref().is_some_and(|s| !s.is_empty())
}

fn has_body(todo: &NewTodo) -> bool {
    todo.body.as_deref().is_some_and(|s| !s.is_empty())
}

fn has_category(todo: &NewTodo) -> bool {
    todo.category.as_deref().is_some_and(|s| !s.is_empty())
}

/// Check every rule against the payload. On success, returns the draft to
/// persist; otherwise all violated rules, in order.
pub fn validate(new: NewTodo) -> Result<TodoDraft, ApiError> {
    let violations: Vec<String> = RULES
        .iter()
        .filter(|(holds, _)| !holds(&new))
        .map(|(_, message)| (*message).to_string())
        .collect();

    if !violations.is_empty() {
        return Err(ApiError::ValidationFailed(violations));
    }

    // The rules above guarantee these are present and non-empty.
    Ok(TodoDraft {
        owner: new.owner.unwrap_or_default(),
        status: new.status,
        body: new.body.unwrap_or_default(),
        category: new.category.unwrap_or_default(),
    })
}
