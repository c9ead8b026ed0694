//! Todo API — a query-building and validation layer over a document store.

pub mod config;
pub mod error;
pub mod store;
pub mod todos;
