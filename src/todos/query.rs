//! Query building — turns raw request parameters into a validated
//! filter + sort + limit.
//!
//! Filter clauses are an ordered sequence of optional predicates combined
//! with logical AND by the backend; an absent parameter omits its clause
//! entirely. Sort and filter always apply to the full set, limit trims last,
//! so "the 2 first matches by sort field" semantics hold.

use serde::Deserialize;

use crate::error::ApiError;

/// Raw, unvalidated query parameters as they arrive on the request.
///
/// Everything is kept as a string so that out-of-domain values (e.g. a
/// non-numeric limit) produce our own error message rather than a generic
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub owner: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub contains: Option<String>,
    pub sortby: Option<String>,
    pub sortorder: Option<String>,
    pub limit: Option<String>,
}

/// The fixed set of sortable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Owner,
    Body,
    Status,
    Category,
}

impl SortField {
    /// The document field name this sorts on.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Owner => "owner",
            SortField::Body => "body",
            SortField::Status => "status",
            SortField::Category => "category",
        }
    }

    fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "owner" => Ok(SortField::Owner),
            "body" => Ok(SortField::Body),
            "status" => Ok(SortField::Status),
            "category" => Ok(SortField::Category),
            _ => Err(ApiError::InvalidParameter(
                "Invalid sortby field.".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(value: &str) -> Result<Self, ApiError> {
        if value.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else if value.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else {
            Err(ApiError::InvalidParameter(
                "sortorder must be 'asc' or 'desc'".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

/// The AND-combined filter clauses. Pattern values are raw literals; each
/// backend escapes them before compiling, so no wildcard semantics reach the
/// caller.
///
/// `owner` and `category` match case-insensitively; `body_contains` is
/// case-sensitive. The asymmetry is intentional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub owner: Option<String>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub body_contains: Option<String>,
}

/// A fully validated listing request, ready for any backend.
#[derive(Debug, Clone)]
pub struct TodoQuery {
    pub filter: TodoFilter,
    pub sort: Sort,
    pub limit: Option<i64>,
}

impl TodoQuery {
    /// Validate every parameter independently and assemble the query.
    pub fn from_params(params: &ListParams) -> Result<Self, ApiError> {
        let status = match params.status.as_deref() {
            None => None,
            Some(value) if value.eq_ignore_ascii_case("complete") => Some(true),
            Some(value) if value.eq_ignore_ascii_case("incomplete") => Some(false),
            Some(_) => {
                return Err(ApiError::InvalidParameter(
                    "Status must be 'complete' or 'incomplete'.".to_string(),
                ));
            }
        };

        let filter = TodoFilter {
            owner: params.owner.clone(),
            category: params.category.clone(),
            status,
            body_contains: params.contains.clone(),
        };

        let field = match params.sortby.as_deref() {
            None => SortField::Owner,
            Some(value) => SortField::parse(value)?,
        };
        let order = match params.sortorder.as_deref() {
            None => SortOrder::Asc,
            Some(value) => SortOrder::parse(value)?,
        };

        let limit = params.limit.as_deref().map(parse_limit).transpose()?;

        Ok(Self {
            filter,
            sort: Sort { field, order },
            limit,
        })
    }
}

fn parse_limit(raw: &str) -> Result<i64, ApiError> {
    let limit: i64 = raw.parse().map_err(|_| {
        ApiError::InvalidParameter("The limit must be a number.".to_string())
    })?;
    if limit < 1 {
        return Err(ApiError::InvalidParameter(
            "The limit must be a positive integer.".to_string(),
        ));
    }
    Ok(limit)
}
