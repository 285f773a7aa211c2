//! Persistent storage for the document-store side of the system

pub mod sqlite;
pub mod vector;

pub use sqlite::SqliteDocumentStore;
pub use vector::SqliteVectorIndex;
