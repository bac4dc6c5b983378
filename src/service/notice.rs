use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::debug;

const FLASH_COOKIE: &str = "novella_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
    pub duration_ms: u32,
}

impl Notice {
    fn new(text: &str, kind: NoticeKind, duration_ms: u32) -> Self {
        Self {
            title: text.to_string(),
            description: text.to_string(),
            kind,
            duration_ms,
        }
    }

    pub fn added_to_library() -> Self {
        Self::new("Novel added to library", NoticeKind::Success, 5000)
    }

    pub fn updated_in_library() -> Self {
        Self::new("Novel updated in library", NoticeKind::Success, 5000)
    }

    pub fn removed_from_library() -> Self {
        Self::new("Novel removed from library", NoticeKind::Error, 9000)
    }

    pub fn novel_updated() -> Self {
        Self::new("Novel updated", NoticeKind::Success, 5000)
    }
}

/// Queue a notice for the page the browser is redirected to.
pub fn push(jar: PrivateCookieJar, notice: &Notice, secure: bool) -> PrivateCookieJar {
    let Ok(value) = serde_json::to_string(notice) else {
        return jar;
    };
    let cookie = Cookie::build(Cookie::new(FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Pop the pending notice, if any. The cookie is cleared either way.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Notice>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let notice = serde_json::from_str(&raw)
        .inspect_err(|e| debug!(error = %e, "dropping unreadable flash cookie"))
        .ok();
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, notice)
}
