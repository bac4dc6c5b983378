//! Server-rendered HTML.
//!
//! Everything interpolated goes through [`escape`] except novel descriptions, which are
//! stored as HTML and rendered as such.

pub mod auth;
pub mod novel;

use crate::service::notice::{Notice, NoticeKind};
use axum::http::StatusCode;
use std::fmt::Write;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn layout(title: &str, signed_in: bool, notice: Option<&Notice>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header><a href="/">novella</a> {auth}</header>
"#,
        title = escape(title),
        auth = if signed_in {
            r#"<form method="post" action="/auth/sign-out" class="inline"><button type="submit">Sign out</button></form>"#
        } else {
            r#"<a href="/auth/sign-in">Sign in</a>"#
        },
    );
    if let Some(notice) = notice {
        html.push_str(&toast(notice));
    }
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn toast(notice: &Notice) -> String {
    let kind = match notice.kind {
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
    };
    format!(
        r#"<div class="toast toast-{kind}" role="status" data-duration="{duration}"><strong>{title}</strong><p>{description}</p></div>
"#,
        duration = notice.duration_ms,
        title = escape(&notice.title),
        description = escape(&notice.description),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<main><h1>{}</h1><p>{}</p></main>",
        escape(title),
        escape(message)
    );
    layout(title, false, None, &body)
}
