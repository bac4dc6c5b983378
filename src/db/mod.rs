//! Store module: row models and the two backends of the store contract.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring the `Novels`, `Books`, `Users` and `Library` rows
//! - `schema.rs`: SQL DDL for the local SQLite backend
//! - `sqlite.rs`: local backend
//! - `supabase.rs`: PostgREST/GoTrue client for the hosted backend
//! - `store.rs`: `Store`, the single entry point the services use

pub mod models;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod supabase;

pub use models::{
    Book, LibraryEntry, LibraryFields, Novel, NovelId, NovelPatch, ReadingStatus, User, UserId,
};
pub use schema::SQLITE_INIT;
pub use sqlite::{Seed, SqlitePool, SqliteStore};
pub use store::Store;
pub use supabase::SupabaseClient;
