mod common;

use axum::http::StatusCode;
use common::{
    ADMIN, Browser, READER, app, app_with_sign_in, body_string, location, seeded_store,
};
use novella::db::ReadingStatus;

#[tokio::test]
async fn anonymous_detail_view_renders_stored_fields() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut browser = Browser::default();

    let resp = browser.get(&app, "/novels/1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;

    assert!(html.contains("<h1 class=\"title\">The Wandering Inn</h1>"));
    assert!(html.contains("Author of The Wandering Inn"));
    assert!(html.contains("https://covers.example/1.jpg"));
    // description is rendered as stored HTML
    assert!(html.contains("<p>About <em>The Wandering Inn</em>.</p>"));
    assert!(html.contains("<td>Volume 2</td>"));
    // books have no page of their own
    assert!(!html.contains("/books/"));
    assert!(!html.contains("Add To Library"));
    assert!(!html.contains("Edit Novel"));
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut browser = Browser::default();

    for uri in ["/novels/999", "/novels/not-a-number"] {
        let resp = browser.get(&app, uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body_string(resp).await.contains("Novel not found"));
    }
}

#[tokio::test]
async fn book_table_is_hidden_when_there_are_no_books() {
    let local = seeded_store().await;
    let app = app(&local);
    let html = body_string(Browser::default().get(&app, "/novels/7").await).await;
    assert!(!html.contains("<table class=\"books\">"));
}

#[tokio::test]
async fn edit_control_requires_admin() {
    let local = seeded_store().await;
    let app = app(&local);

    let mut reader = Browser::sign_in(&app, READER).await;
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(html.contains("Add To Library"));
    assert!(!html.contains("Edit Novel"));

    let mut admin = Browser::sign_in(&app, ADMIN).await;
    let html = body_string(admin.get(&app, "/novels/1").await).await;
    assert!(html.contains("Add To Library"));
    assert!(html.contains("Edit Novel"));
}

#[tokio::test]
async fn writes_without_session_redirect_to_sign_in() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut browser = Browser::default();

    for uri in ["/novels/1/library", "/novels/1/library/delete", "/novels/1/edit"] {
        let resp = browser.post_form(&app, uri, &[]).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/auth/sign-in");
    }
    assert!(local.library_entries(READER, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_cannot_sign_in() {
    let local = seeded_store().await;
    let app = app(&local);
    let resp = Browser::default()
        .post_form(&app, "/auth/sign-in", &[("email", "nobody"), ("password", "x")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(resp).await.contains("Invalid credentials."));
}

#[tokio::test]
async fn local_sign_in_is_refused_unless_enabled() {
    let local = seeded_store().await;
    let app = app_with_sign_in(&local, false);
    let mut browser = Browser::default();

    let resp = browser
        .post_form(&app, "/auth/sign-in", &[("email", ADMIN), ("password", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(resp).await.contains("Invalid credentials."));
    assert!(browser.header().is_empty());

    let html = body_string(browser.get(&app, "/novels/7").await).await;
    assert!(!html.contains("Edit Novel"));

    let resp = browser
        .post_form(&app, "/novels/7/edit", &[("title", "Hijacked")])
        .await;
    assert_eq!(location(&resp), "/auth/sign-in");
    let stored = local.novel(7).await.unwrap().unwrap();
    assert_eq!(stored.title, "Original Title");
}

#[tokio::test]
async fn library_add_update_remove_cycle() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut reader = Browser::sign_in(&app, READER).await;

    let resp = reader
        .post_form(
            &app,
            "/novels/1/library",
            &[
                ("status", "Reading"),
                ("score", ""),
                ("progress", ""),
                ("date_started", ""),
                ("date_finished", ""),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/novels/1");
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(html.contains("Novel added to library"));
    assert!(html.contains(r#"class="library-button""#));
    assert!(!html.contains("Add To Library"));

    // the notice is shown once
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(!html.contains("Novel added to library"));

    reader
        .post_form(
            &app,
            "/novels/1/library",
            &[
                ("status", "Plan to Read"),
                ("score", "11"),
                ("progress", "500"),
                ("date_started", "2024-05-01"),
                ("date_finished", ""),
            ],
        )
        .await;
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(html.contains("Novel updated in library"));
    assert!(html.contains(">Plan to Read</button>"));

    let rows = local.library_entries(READER, 1).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fields.status, ReadingStatus::PlanToRead);
    assert_eq!(rows[0].fields.score, Some(10));
    assert_eq!(rows[0].fields.progress, Some(120));

    let resp = reader
        .post_form(&app, "/novels/1/library/delete", &[])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(html.contains("Novel removed from library"));
    assert!(html.contains("Add To Library"));
    assert!(local.library_entries(READER, 1).await.unwrap().is_empty());

    // nothing left to delete: no notice
    reader
        .post_form(&app, "/novels/1/library/delete", &[])
        .await;
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(!html.contains("Novel removed from library"));
}

#[tokio::test]
async fn malformed_library_form_is_rejected() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut reader = Browser::sign_in(&app, READER).await;

    let resp = reader
        .post_form(&app, "/novels/1/library", &[("status", "Paused")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(local.library_entries(READER, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_library_write_shows_no_notice() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut reader = Browser::sign_in(&app, READER).await;
    sqlx::query(r#"DROP TABLE "Library""#)
        .execute(local.pool())
        .await
        .unwrap();

    let resp = reader
        .post_form(&app, "/novels/1/library", &[("status", "Reading")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(!html.contains("toast"));
}

#[tokio::test]
async fn reader_cannot_edit_a_novel() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut reader = Browser::sign_in(&app, READER).await;

    let resp = reader
        .post_form(
            &app,
            "/novels/7/edit",
            &[
                ("title", "Hijacked"),
                ("author", "A"),
                ("cover", "C"),
                ("description", "D"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(local.novel(7).await.unwrap().unwrap().title, "Original Title");
}

#[tokio::test]
async fn admin_edit_is_visible_after_redirect() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut admin = Browser::sign_in(&app, ADMIN).await;

    let resp = admin
        .post_form(
            &app,
            "/novels/7/edit",
            &[
                ("title", "T2"),
                ("author", "A2"),
                ("cover", "C2"),
                ("description", "D2"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/novels/7");

    let html = body_string(admin.get(&app, "/novels/7").await).await;
    assert!(html.contains("<h1 class=\"title\">T2</h1>"));
    assert!(html.contains("Novel updated"));
    let untouched = local.novel(8).await.unwrap().unwrap();
    assert_eq!(untouched.title, "Bystander");
}

#[tokio::test]
async fn sign_out_drops_the_session() {
    let local = seeded_store().await;
    let app = app(&local);
    let mut reader = Browser::sign_in(&app, READER).await;

    let resp = reader.post_form(&app, "/auth/sign-out", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let html = body_string(reader.get(&app, "/novels/1").await).await;
    assert!(!html.contains("Add To Library"));
}
