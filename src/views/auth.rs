use super::{escape, layout};
use crate::service::notice::Notice;

pub fn home(user_id: Option<&str>, notice: Option<&Notice>) -> String {
    let greeting = match user_id {
        Some(id) => format!("<p>Signed in as <code>{}</code>.</p>", escape(id)),
        None => r#"<p><a href="/auth/sign-in">Sign in</a> to keep a library.</p>"#.to_string(),
    };
    let body = format!("<main><h1>novella</h1>{greeting}</main>");
    layout("novella", user_id.is_some(), notice, &body)
}

pub fn sign_in(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<main>
<h1>Sign in</h1>
{error}
<form method="post" action="/auth/sign-in">
<label>Email <input type="text" name="email" required></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Sign in</button>
</form>
</main>"#
    );
    layout("Sign in", false, None, &body)
}
