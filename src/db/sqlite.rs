use crate::db::models::{Book, LibraryEntry, LibraryFields, Novel, NovelId, NovelPatch, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::NovellaError;
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::{fs, path::Path, str::FromStr};
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Local implementation of the four-table store contract.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

/// Fixture file layout accepted by [`SqliteStore::seed_from_file`].
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub novels: Vec<Novel>,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, NovellaError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut pool_opts = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // every connection to `:memory:` is its own database; pin a single one
            pool_opts = pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), NovellaError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn seed_from_file(&self, path: &Path) -> Result<(), NovellaError> {
        let contents = fs::read_to_string(path)?;
        let seed: Seed = serde_json::from_str(&contents)?;
        info!(
            path = %path.display(),
            novels = seed.novels.len(),
            books = seed.books.len(),
            users = seed.users.len(),
            "seeding local store"
        );
        self.seed(seed).await
    }

    /// Upsert every fixture row in one transaction.
    pub async fn seed(&self, seed: Seed) -> Result<(), NovellaError> {
        let mut tx = self.pool.begin().await?;
        for novel in seed.novels {
            sqlx::query(
                r#"INSERT INTO "Novels" (id, title, author, cover, description, chapters)
                   VALUES (?, ?, ?, ?, ?, ?)
                   ON CONFLICT(id) DO UPDATE SET
                       title=excluded.title,
                       author=excluded.author,
                       cover=excluded.cover,
                       description=excluded.description,
                       chapters=excluded.chapters"#,
            )
            .bind(novel.id)
            .bind(novel.title)
            .bind(novel.author)
            .bind(novel.cover)
            .bind(novel.description)
            .bind(novel.chapters)
            .execute(&mut *tx)
            .await?;
        }
        for book in seed.books {
            sqlx::query(
                r#"INSERT INTO "Books" (id, novel_id, title, cover, volume)
                   VALUES (?, ?, ?, ?, ?)
                   ON CONFLICT(id) DO UPDATE SET
                       novel_id=excluded.novel_id,
                       title=excluded.title,
                       cover=excluded.cover,
                       volume=excluded.volume"#,
            )
            .bind(book.id)
            .bind(book.novel_id)
            .bind(book.title)
            .bind(book.cover)
            .bind(book.volume)
            .execute(&mut *tx)
            .await?;
        }
        for user in seed.users {
            sqlx::query(
                r#"INSERT INTO "Users" (id, admin) VALUES (?, ?)
                   ON CONFLICT(id) DO UPDATE SET admin=excluded.admin"#,
            )
            .bind(user.id)
            .bind(user.admin)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn novel(&self, id: NovelId) -> Result<Option<Novel>, NovellaError> {
        let novel = sqlx::query_as::<_, Novel>(
            r#"SELECT id, title, author, cover, description, chapters
               FROM "Novels" WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(novel)
    }

    pub async fn update_novel(&self, id: NovelId, patch: &NovelPatch) -> Result<u64, NovellaError> {
        let done = sqlx::query(
            r#"UPDATE "Novels" SET
                title = ?,
                author = ?,
                cover = ?,
                description = ?
              WHERE id = ?"#,
        )
        .bind(&patch.title)
        .bind(&patch.author)
        .bind(&patch.cover)
        .bind(&patch.description)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected())
    }

    /// Books of one novel, in storage order.
    pub async fn books_by_novel(&self, novel_id: NovelId) -> Result<Vec<Book>, NovellaError> {
        let books = sqlx::query_as::<_, Book>(
            r#"SELECT id, novel_id, title, cover, volume FROM "Books" WHERE novel_id = ?"#,
        )
        .bind(novel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    pub async fn user(&self, id: &str) -> Result<Option<User>, NovellaError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT id, admin FROM "Users" WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn library_entries(
        &self,
        user_id: &str,
        novel_id: NovelId,
    ) -> Result<Vec<LibraryEntry>, NovellaError> {
        let rows = sqlx::query_as::<_, LibraryEntry>(
            r#"SELECT user_id, novel_id, status, score, progress, date_started, date_finished
               FROM "Library" WHERE user_id = ? AND novel_id = ?"#,
        )
        .bind(user_id)
        .bind(novel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_library_entry(&self, entry: &LibraryEntry) -> Result<(), NovellaError> {
        let f = &entry.fields;
        sqlx::query(
            r#"INSERT INTO "Library" (
                user_id, novel_id, status, score, progress, date_started, date_finished
            ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&entry.user_id)
        .bind(entry.novel_id)
        .bind(f.status.as_str())
        .bind(f.score)
        .bind(f.progress)
        .bind(f.date_started)
        .bind(f.date_finished)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update_library_entry(
        &self,
        user_id: &str,
        novel_id: NovelId,
        fields: &LibraryFields,
    ) -> Result<u64, NovellaError> {
        let done = sqlx::query(
            r#"UPDATE "Library" SET
                status = ?,
                score = ?,
                progress = ?,
                date_started = ?,
                date_finished = ?
              WHERE user_id = ? AND novel_id = ?"#,
        )
        .bind(fields.status.as_str())
        .bind(fields.score)
        .bind(fields.progress)
        .bind(fields.date_started)
        .bind(fields.date_finished)
        .bind(user_id)
        .bind(novel_id)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected())
    }

    pub async fn delete_library_entry(
        &self,
        user_id: &str,
        novel_id: NovelId,
    ) -> Result<u64, NovellaError> {
        let done = sqlx::query(r#"DELETE FROM "Library" WHERE user_id = ? AND novel_id = ?"#)
            .bind(user_id)
            .bind(novel_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}
