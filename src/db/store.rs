use crate::db::models::{Book, LibraryEntry, LibraryFields, Novel, NovelId, NovelPatch, User};
use crate::db::sqlite::SqliteStore;
use crate::db::supabase::SupabaseClient;
use crate::error::NovellaError;

pub const NOVELS: &str = "Novels";
pub const BOOKS: &str = "Books";
pub const USERS: &str = "Users";
pub const LIBRARY: &str = "Library";

/// The remote store of record, reached through one of its backends.
///
/// Every call is independently committed; there are no transactions across calls.
#[derive(Clone)]
pub enum Store {
    Supabase(SupabaseClient),
    Sqlite(SqliteStore),
}

impl Store {
    /// Scope subsequent calls to a signed-in user (row-level security on the hosted backend).
    pub fn for_token(&self, access_token: Option<&str>) -> Store {
        match (self, access_token) {
            (Store::Supabase(client), Some(token)) => Store::Supabase(client.with_bearer(token)),
            _ => self.clone(),
        }
    }

    pub async fn novel(&self, id: NovelId) -> Result<Option<Novel>, NovellaError> {
        match self {
            Store::Supabase(c) => c.from(NOVELS).eq("id", id).maybe_single().await,
            Store::Sqlite(s) => s.novel(id).await,
        }
    }

    pub async fn update_novel(&self, id: NovelId, patch: &NovelPatch) -> Result<(), NovellaError> {
        match self {
            Store::Supabase(c) => c.from(NOVELS).eq("id", id).update(patch).await,
            Store::Sqlite(s) => s.update_novel(id, patch).await.map(|_| ()),
        }
    }

    pub async fn books_by_novel(&self, novel_id: NovelId) -> Result<Vec<Book>, NovellaError> {
        match self {
            Store::Supabase(c) => c.from(BOOKS).eq("novel_id", novel_id).select().await,
            Store::Sqlite(s) => s.books_by_novel(novel_id).await,
        }
    }

    pub async fn user(&self, id: &str) -> Result<Option<User>, NovellaError> {
        match self {
            Store::Supabase(c) => c.from(USERS).eq("id", id).maybe_single().await,
            Store::Sqlite(s) => s.user(id).await,
        }
    }

    pub async fn library_entries(
        &self,
        user_id: &str,
        novel_id: NovelId,
    ) -> Result<Vec<LibraryEntry>, NovellaError> {
        match self {
            Store::Supabase(c) => {
                c.from(LIBRARY)
                    .eq("user_id", user_id)
                    .eq("novel_id", novel_id)
                    .select()
                    .await
            }
            Store::Sqlite(s) => s.library_entries(user_id, novel_id).await,
        }
    }

    pub async fn insert_library_entry(&self, entry: &LibraryEntry) -> Result<(), NovellaError> {
        match self {
            Store::Supabase(c) => c.from(LIBRARY).insert(entry).await,
            Store::Sqlite(s) => s.insert_library_entry(entry).await,
        }
    }

    pub async fn update_library_entry(
        &self,
        user_id: &str,
        novel_id: NovelId,
        fields: &LibraryFields,
    ) -> Result<(), NovellaError> {
        match self {
            Store::Supabase(c) => {
                c.from(LIBRARY)
                    .eq("user_id", user_id)
                    .eq("novel_id", novel_id)
                    .update(fields)
                    .await
            }
            Store::Sqlite(s) => s
                .update_library_entry(user_id, novel_id, fields)
                .await
                .map(|_| ()),
        }
    }

    pub async fn delete_library_entry(
        &self,
        user_id: &str,
        novel_id: NovelId,
    ) -> Result<(), NovellaError> {
        match self {
            Store::Supabase(c) => {
                c.from(LIBRARY)
                    .eq("user_id", user_id)
                    .eq("novel_id", novel_id)
                    .delete()
                    .await
            }
            Store::Sqlite(s) => s.delete_library_entry(user_id, novel_id).await.map(|_| ()),
        }
    }
}
