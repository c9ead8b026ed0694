//! Todo domain — model, query building, validation, and HTTP routes.

pub mod model;
pub mod query;
pub mod routes;
pub mod validate;
