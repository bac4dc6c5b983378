#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use axum_extra::extract::cookie::Key;
use novella::db::{Book, Novel, Seed, SqliteStore, Store, User};
use novella::service::session::SessionProvider;
use novella::{NovellaState, novella_router};
use std::collections::BTreeMap;
use tower::ServiceExt;

pub const READER: &str = "reader-1";
pub const ADMIN: &str = "admin-1";

pub fn novel(id: i64, title: &str, chapters: i64) -> Novel {
    Novel {
        id,
        title: title.to_string(),
        author: format!("Author of {title}"),
        cover: format!("https://covers.example/{id}.jpg"),
        description: format!("<p>About <em>{title}</em>.</p>"),
        chapters: Some(chapters),
    }
}

pub fn book(id: i64, novel_id: i64, volume: i64) -> Book {
    Book {
        id,
        novel_id,
        title: format!("Volume {volume}"),
        cover: format!("https://covers.example/b{id}.jpg"),
        volume,
    }
}

/// Fresh in-memory store with two readers' worth of fixtures.
pub async fn seeded_store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory store");
    store
        .seed(Seed {
            novels: vec![
                novel(1, "The Wandering Inn", 120),
                novel(7, "Original Title", 40),
                novel(8, "Bystander", 10),
            ],
            // volume 2 first: listing keeps storage order
            books: vec![book(10, 1, 2), book(11, 1, 1), book(12, 8, 1)],
            users: vec![
                User {
                    id: READER.to_string(),
                    admin: false,
                },
                User {
                    id: ADMIN.to_string(),
                    admin: true,
                },
            ],
        })
        .await
        .expect("failed to seed store");
    store
}

/// Router over `local` with password-less local sign-in enabled.
pub fn app(local: &SqliteStore) -> Router {
    app_with_sign_in(local, true)
}

pub fn app_with_sign_in(local: &SqliteStore, dev_sign_in: bool) -> Router {
    let store = Store::Sqlite(local.clone());
    let sessions = SessionProvider::new(store.clone(), dev_sign_in);
    novella_router(NovellaState::new(store, sessions, Key::generate(), true))
}

/// Minimal browser-side cookie jar for driving the router.
#[derive(Default, Clone)]
pub struct Browser {
    cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn absorb(&mut self, resp: &Response<Body>) {
        for value in resp.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().expect("set-cookie was not ascii");
            let pair = raw.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let removed = raw.contains("Max-Age=0") || value.is_empty();
            if removed {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub async fn get(&mut self, app: &Router, uri: &str) -> Response<Body> {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::COOKIE, self.header())
            .body(Body::empty())
            .expect("failed to build request");
        let resp = app.clone().oneshot(req).await.expect("request failed");
        self.absorb(&resp);
        resp
    }

    pub async fn post_form(
        &mut self,
        app: &Router,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, self.header())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("failed to build request");
        let resp = app.clone().oneshot(req).await.expect("request failed");
        self.absorb(&resp);
        resp
    }

    pub async fn sign_in(app: &Router, user_id: &str) -> Self {
        let mut browser = Self::default();
        let resp = browser
            .post_form(app, "/auth/sign-in", &[("email", user_id), ("password", "")])
            .await;
        assert!(resp.status().is_redirection(), "sign-in failed: {}", resp.status());
        browser
    }
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
