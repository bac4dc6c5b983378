use crate::db::{Book, Novel, Store};
use crate::service::capability::role_of;
use crate::service::edit::NovelEditWidget;
use crate::service::library::LibraryWidget;
use crate::service::loader::load_novel;
use crate::service::session::Session;
use tracing::warn;

/// Everything the detail view renders, gathered before the first byte is written.
pub struct NovelPage {
    pub novel: Novel,
    pub books: Vec<Book>,
    /// Present whenever a session exists, whatever the membership state.
    pub library: Option<LibraryWidget>,
    /// Present only for admins.
    pub editor: Option<NovelEditWidget>,
}

impl NovelPage {
    /// `None` when the novel cannot be loaded.
    pub async fn load(store: &Store, session: Option<&Session>, raw_id: &str) -> Option<Self> {
        let novel = load_novel(store, raw_id).await?;
        let scoped = store.for_token(session.and_then(|s| s.access_token.as_deref()));

        let (role, books, library) = tokio::join!(
            role_of(&scoped, session),
            books_for(&scoped, &novel),
            async {
                match session {
                    Some(s) => Some(LibraryWidget::mount(store, s, &novel).await),
                    None => None,
                }
            }
        );

        let editor = role.can_edit_novels().then(|| NovelEditWidget::new(&novel));
        Some(Self {
            novel,
            books,
            library,
            editor,
        })
    }
}

async fn books_for(store: &Store, novel: &Novel) -> Vec<Book> {
    store
        .books_by_novel(novel.id)
        .await
        .inspect_err(|e| warn!(novel_id = novel.id, error = %e, "failed to load books"))
        .unwrap_or_default()
}
