use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::db::{SqliteStore, Store, SupabaseClient};
use crate::error::NovellaError;
use crate::handlers::{auth, library, novel};
use crate::service::session::SessionProvider;

#[derive(Clone)]
pub struct NovellaState {
    pub store: Store,
    pub sessions: SessionProvider,
    pub secure_cookie: bool,
    key: Key,
}

impl NovellaState {
    pub fn new(
        store: Store,
        sessions: SessionProvider,
        key: Key,
        insecure_cookie: bool,
    ) -> Self {
        Self {
            store,
            sessions,
            secure_cookie: !insecure_cookie,
            key,
        }
    }

    /// Build the configured backend and cookie key.
    pub async fn from_config(cfg: &Config) -> Result<Self, NovellaError> {
        let store = match cfg.store.backend {
            StoreBackend::Supabase => {
                let client = SupabaseClient::from_config(&cfg.store)?;
                info!(
                    url = ?cfg.store.supabase_url.as_ref().map(|u| u.as_str()),
                    "using hosted store"
                );
                Store::Supabase(client)
            }
            StoreBackend::Sqlite => {
                let local = SqliteStore::connect(&cfg.store.database_url).await?;
                if let Some(seed) = cfg.store.seed_path.as_deref() {
                    local.seed_from_file(seed).await?;
                }
                info!(database_url = %cfg.store.database_url, "using local store");
                if cfg.store.dev_sign_in {
                    warn!("store.dev_sign_in is on; user ids sign in without a password");
                }
                Store::Sqlite(local)
            }
        };
        let sessions = SessionProvider::new(store.clone(), cfg.store.dev_sign_in);
        let key = match cfg.basic.cookie_secret.as_deref() {
            Some(secret) => Key::try_from(secret.as_bytes()).map_err(|_| {
                NovellaError::Config("basic.cookie_secret must be at least 64 bytes".into())
            })?,
            None => {
                warn!("no cookie_secret configured; sessions will not survive a restart");
                Key::generate()
            }
        };
        Ok(Self::new(store, sessions, key, cfg.basic.insecure_cookie))
    }
}

impl FromRef<NovellaState> for Key {
    fn from_ref(state: &NovellaState) -> Self {
        state.key.clone()
    }
}

pub fn novella_router(state: NovellaState) -> Router {
    Router::new()
        .route("/", get(auth::home))
        .route("/healthz", get(|| async { "ok" }))
        .route("/novels/{id}", get(novel::novel_page))
        .route("/novels/{id}/edit", post(novel::edit_novel))
        .route("/novels/{id}/library", post(library::save_library_entry))
        .route("/novels/{id}/library/delete", post(library::delete_library_entry))
        .route("/auth/sign-in", get(auth::sign_in_page).post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .with_state(state)
}
