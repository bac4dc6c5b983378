use crate::db::{Store, UserId};
use crate::error::NovellaError;
use serde::Deserialize;
use tracing::{debug, warn};

/// The caller's authentication context for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    /// Present on the hosted backend; forwarded so row-level security sees the user.
    pub access_token: Option<String>,
}

impl Session {
    /// Opaque value kept in the session cookie.
    pub fn cookie_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.user_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Resolves session cookies into users through the store's auth side.
///
/// Hosted: the cookie carries a GoTrue access token. Local: it carries a `Users.id`.
///
/// The local store keeps no passwords, so local sign-in is refused unless `dev_sign_in`
/// is set, in which case any existing `Users.id` signs in.
#[derive(Clone)]
pub struct SessionProvider {
    store: Store,
    dev_sign_in: bool,
}

impl SessionProvider {
    pub fn new(store: Store, dev_sign_in: bool) -> Self {
        Self { store, dev_sign_in }
    }

    pub async fn sign_in(&self, form: &SignInForm) -> Result<Session, NovellaError> {
        match &self.store {
            Store::Supabase(client) => {
                let auth = client
                    .sign_in_with_password(form.email.trim(), &form.password)
                    .await?;
                Ok(Session {
                    user_id: auth.user.id,
                    access_token: Some(auth.access_token),
                })
            }
            Store::Sqlite(_) if !self.dev_sign_in => {
                debug!("local sign-in attempted while store.dev_sign_in is off");
                Err(NovellaError::Unauthorized)
            }
            Store::Sqlite(local) => {
                let user_id = form.email.trim();
                match local.user(user_id).await? {
                    Some(user) => Ok(Session {
                        user_id: user.id,
                        access_token: None,
                    }),
                    None => Err(NovellaError::Unauthorized),
                }
            }
        }
    }

    /// Resolve a cookie token. Any failure reads as "no session".
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let resolved = match &self.store {
            Store::Supabase(client) => client.user_for_token(token).await.map(|user| {
                user.map(|u| Session {
                    user_id: u.id,
                    access_token: Some(token.to_string()),
                })
            }),
            Store::Sqlite(_) if !self.dev_sign_in => Ok(None),
            Store::Sqlite(local) => local.user(token).await.map(|user| {
                user.map(|u| Session {
                    user_id: u.id,
                    access_token: None,
                })
            }),
        };
        match resolved {
            Ok(session) => {
                if session.is_none() {
                    debug!("session cookie no longer maps to a user");
                }
                session
            }
            Err(e) => {
                warn!(error = %e, "failed to resolve session");
                None
            }
        }
    }
}
