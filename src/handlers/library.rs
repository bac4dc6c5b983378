use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{debug, error};

use crate::middleware::session::RequireSession;
use crate::service::library::{LibraryFormInput, LibraryWidget};
use crate::service::loader::load_novel;
use crate::service::notice;
use crate::{NovellaError, router::NovellaState};

// Write failures are logged and produce no notice; only successes are announced.

/// POST /novels/{id}/library
pub async fn save_library_entry(
    State(state): State<NovellaState>,
    Path(id): Path<String>,
    RequireSession(session): RequireSession,
    jar: PrivateCookieJar,
    Form(input): Form<LibraryFormInput>,
) -> Result<Response, NovellaError> {
    let novel = load_novel(&state.store, &id)
        .await
        .ok_or(NovellaError::NotFound)?;
    let fields = input.parse(novel.chapters)?;

    let mut widget = LibraryWidget::new(&state.store, &session, &novel);
    let jar = match widget.save(fields).await {
        Ok(outcome) => notice::push(jar, &outcome.notice(), state.secure_cookie),
        Err(e) => {
            error!(novel_id = novel.id, user_id = %session.user_id, error = %e, "library save failed");
            jar
        }
    };
    Ok((jar, Redirect::to(&format!("/novels/{}", novel.id))).into_response())
}

/// POST /novels/{id}/library/delete
pub async fn delete_library_entry(
    State(state): State<NovellaState>,
    Path(id): Path<String>,
    RequireSession(session): RequireSession,
    jar: PrivateCookieJar,
) -> Result<Response, NovellaError> {
    let novel = load_novel(&state.store, &id)
        .await
        .ok_or(NovellaError::NotFound)?;

    let mut widget = LibraryWidget::mount(&state.store, &session, &novel).await;
    let jar = match widget.delete().await {
        Ok(Some(removed)) => notice::push(jar, &removed, state.secure_cookie),
        Ok(None) => {
            debug!(novel_id = novel.id, user_id = %session.user_id, "nothing to remove");
            jar
        }
        Err(e) => {
            error!(novel_id = novel.id, user_id = %session.user_id, error = %e, "library delete failed");
            jar
        }
    };
    Ok((jar, Redirect::to(&format!("/novels/{}", novel.id))).into_response())
}
