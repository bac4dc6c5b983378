use crate::db::Store;
use crate::service::session::Session;
use tracing::warn;

/// What the current caller may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Anonymous,
    Reader,
    Admin,
}

impl Role {
    pub fn can_edit_novels(self) -> bool {
        self == Role::Admin
    }
}

/// Look up the caller's `Users.admin` flag. A failed or empty lookup never grants admin.
pub async fn role_of(store: &Store, session: Option<&Session>) -> Role {
    let Some(session) = session else {
        return Role::Anonymous;
    };
    match store.user(&session.user_id).await {
        Ok(Some(user)) if user.admin => Role::Admin,
        Ok(_) => Role::Reader,
        Err(e) => {
            warn!(user_id = %session.user_id, error = %e, "admin lookup failed");
            Role::Reader
        }
    }
}
