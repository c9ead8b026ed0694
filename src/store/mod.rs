//! Persistence layer — one trait, pluggable document-store backends.

pub mod memory;
pub mod mongo;
pub mod traits;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use traits::TodoStore;
