use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::info;

use crate::middleware::session::{MaybeSession, clear_session_cookie, session_cookie};
use crate::service::notice;
use crate::service::session::SignInForm;
use crate::views;
use crate::{NovellaError, router::NovellaState};

/// GET /
pub async fn home(MaybeSession(session): MaybeSession, jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, notice) = notice::take(jar);
    let user_id = session.as_ref().map(|s| s.user_id.as_str());
    (jar, Html(views::auth::home(user_id, notice.as_ref())))
}

/// GET /auth/sign-in
pub async fn sign_in_page() -> Html<String> {
    Html(views::auth::sign_in(None))
}

/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<NovellaState>,
    jar: PrivateCookieJar,
    Form(form): Form<SignInForm>,
) -> Result<Response, NovellaError> {
    match state.sessions.sign_in(&form).await {
        Ok(session) => {
            info!(user_id = %session.user_id, "signed in");
            let jar = jar.add(session_cookie(&session, state.secure_cookie));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(NovellaError::Unauthorized) => Ok((
            StatusCode::UNAUTHORIZED,
            Html(views::auth::sign_in(Some("Invalid credentials."))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// POST /auth/sign-out
pub async fn sign_out(jar: PrivateCookieJar) -> impl IntoResponse {
    (jar.remove(clear_session_cookie()), Redirect::to("/"))
}
