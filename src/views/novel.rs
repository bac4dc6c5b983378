use super::{escape, layout};
use crate::db::{Book, LibraryFields, Novel, ReadingStatus};
use crate::service::edit::NovelEditWidget;
use crate::service::library::{LibraryWidget, MAX_SCORE, Membership};
use crate::service::notice::Notice;
use crate::service::page::NovelPage;
use std::fmt::Write;

pub fn render(page: &NovelPage, notice: Option<&Notice>) -> String {
    let novel = &page.novel;
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<div class="banner" style="background-image:url('{cover}')"></div>
<main class="novel">
<section class="aside">
<img src="{cover}" alt="{title}" width="286" height="400">
<div class="controls">
"#,
        cover = escape(&novel.cover),
        title = escape(&novel.title),
    );
    if let Some(library) = &page.library {
        body.push_str(&library_button(library));
    }
    if page.editor.is_some() {
        body.push_str(
            r#"<button type="button" onclick="document.getElementById('edit-dialog').showModal()">Edit Novel</button>
"#,
        );
    }
    let _ = write!(
        body,
        r#"</div>
</section>
<section class="details">
<h1 class="title">{title}</h1>
<h2 class="author">{author}</h2>
<div class="description">{description}</div>
</section>
"#,
        title = escape(&novel.title),
        author = escape(&novel.author),
        description = novel.description,
    );
    if !page.books.is_empty() {
        body.push_str(&book_table(&page.books));
    }
    body.push_str("</main>\n");

    if let Some(library) = &page.library {
        body.push_str(&library_dialog(novel, library));
    }
    if let Some(editor) = &page.editor {
        body.push_str(&edit_dialog(editor));
    }

    layout(&novel.title, page.library.is_some(), notice, &body)
}

fn library_button(library: &LibraryWidget) -> String {
    let label = match library.membership() {
        Membership::NotInLibrary => "Add To Library".to_string(),
        Membership::InLibrary(fields) => escape(fields.status.as_str()),
    };
    format!(
        r#"<button type="button" class="library-button" onclick="document.getElementById('library-dialog').showModal()">{label}</button>
"#
    )
}

fn book_table(books: &[Book]) -> String {
    let mut rows = String::new();
    for book in books {
        let _ = write!(
            rows,
            r#"<tr><td><img src="{cover}" alt="{title}" width="100" height="150"></td><td>{title}</td><td class="numeric">{volume}</td></tr>
"#,
            cover = escape(&book.cover),
            title = escape(&book.title),
            volume = book.volume,
        );
    }
    format!(
        r#"<table class="books">
<thead><tr><th>Cover</th><th>Title</th><th class="numeric">Volume</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
"#
    )
}

fn opt_value<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn library_dialog(novel: &Novel, library: &LibraryWidget) -> String {
    let form: LibraryFields = library.form();
    let mut options = String::new();
    for status in ReadingStatus::ALL {
        let selected = if status == form.status { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{v}"{selected}>{v}</option>"#,
            v = escape(status.as_str())
        );
    }
    format!(
        r#"<dialog id="library-dialog">
<h3>{title}</h3>
<form method="post" action="/novels/{id}/library">
<label>Status <select name="status" required>{options}</select></label>
<label>Score <input type="number" name="score" min="0" max="{max_score}" placeholder="0" value="{score}"></label>
<label>Progress <input type="number" name="progress" min="0"{max_progress} placeholder="0" value="{progress}"></label>
<label>Date Started <input type="date" name="date_started" value="{started}"></label>
<label>Date Finished <input type="date" name="date_finished" value="{finished}"></label>
<button type="submit">Save</button>
</form>
<form method="post" action="/novels/{id}/library/delete">
<button type="submit" class="danger">Delete</button>
</form>
<form method="dialog"><button>Close</button></form>
</dialog>
"#,
        title = escape(&novel.title),
        id = novel.id,
        max_score = MAX_SCORE,
        max_progress = library
            .chapters()
            .map(|c| format!(r#" max="{}""#, c.max(0)))
            .unwrap_or_default(),
        score = opt_value(form.score),
        progress = opt_value(form.progress),
        started = opt_value(form.date_started),
        finished = opt_value(form.date_finished),
    )
}

fn edit_dialog(editor: &NovelEditWidget) -> String {
    let draft = editor.draft();
    format!(
        r#"<dialog id="edit-dialog">
<h3>Edit Novel</h3>
<form method="post" action="/novels/{id}/edit">
<label>Title <input type="text" name="title" required value="{title}"></label>
<label>Author <input type="text" name="author" required value="{author}"></label>
<label>Cover <input type="text" name="cover" required value="{cover}"></label>
<label>Description <textarea name="description" required>{description}</textarea></label>
<button type="submit" class="danger">Update</button>
</form>
<form method="dialog"><button>Close</button></form>
</dialog>
"#,
        id = editor.id(),
        title = escape(&draft.title),
        author = escape(&draft.author),
        cover = escape(&draft.cover),
        description = escape(&draft.description),
    )
}

pub fn not_found(signed_in: bool) -> String {
    layout(
        "Novel not found",
        signed_in,
        None,
        "<main><h1>Novel not found</h1></main>",
    )
}
