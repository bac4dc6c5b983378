use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::error;

use crate::db::NovelPatch;
use crate::middleware::session::{MaybeSession, RequireSession};
use crate::service::capability::role_of;
use crate::service::edit::NovelEditWidget;
use crate::service::loader::load_novel;
use crate::service::notice::{self, Notice};
use crate::service::page::NovelPage;
use crate::views;
use crate::{NovellaError, router::NovellaState};

/// GET /novels/{id}
pub async fn novel_page(
    State(state): State<NovellaState>,
    Path(id): Path<String>,
    MaybeSession(session): MaybeSession,
    jar: PrivateCookieJar,
) -> Response {
    let (jar, notice) = notice::take(jar);
    match NovelPage::load(&state.store, session.as_ref(), &id).await {
        Some(page) => (jar, Html(views::novel::render(&page, notice.as_ref()))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            jar,
            Html(views::novel::not_found(session.is_some())),
        )
            .into_response(),
    }
}

/// POST /novels/{id}/edit -> admin-only metadata update, then back to the detail view.
pub async fn edit_novel(
    State(state): State<NovellaState>,
    Path(id): Path<String>,
    RequireSession(session): RequireSession,
    jar: PrivateCookieJar,
    Form(patch): Form<NovelPatch>,
) -> Result<Response, NovellaError> {
    let store = state.store.for_token(session.access_token.as_deref());
    if !role_of(&store, Some(&session)).await.can_edit_novels() {
        return Err(NovellaError::Forbidden);
    }
    let novel = load_novel(&store, &id).await.ok_or(NovellaError::NotFound)?;

    let mut editor = NovelEditWidget::new(&novel);
    let jar = match editor.update(&store, patch).await {
        Ok(_) => notice::push(jar, &Notice::novel_updated(), state.secure_cookie),
        Err(e @ NovellaError::InvalidForm(_)) => return Err(e),
        Err(e) => {
            error!(novel_id = novel.id, user_id = %session.user_id, error = %e, "novel update failed");
            jar
        }
    };
    Ok((jar, Redirect::to(&format!("/novels/{}", novel.id))).into_response())
}
