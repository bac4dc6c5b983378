mod common;

use common::{ADMIN, READER, seeded_store};
use novella::NovellaError;
use novella::db::{NovelPatch, Store};
use novella::service::capability::{Role, role_of};
use novella::service::edit::NovelEditWidget;
use novella::service::loader::load_novel;
use novella::service::page::NovelPage;
use novella::service::session::Session;

fn session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_string(),
        access_token: None,
    }
}

#[tokio::test]
async fn loader_treats_bad_and_unknown_ids_as_absent() {
    let store = Store::Sqlite(seeded_store().await);
    assert_eq!(load_novel(&store, "1").await.map(|n| n.id), Some(1));
    assert!(load_novel(&store, "404").await.is_none());
    assert!(load_novel(&store, "the-wandering-inn").await.is_none());
}

#[tokio::test]
async fn roles_follow_the_admin_flag() {
    let store = Store::Sqlite(seeded_store().await);
    assert_eq!(role_of(&store, None).await, Role::Anonymous);
    assert_eq!(role_of(&store, Some(&session(READER))).await, Role::Reader);
    assert_eq!(role_of(&store, Some(&session(ADMIN))).await, Role::Admin);
    assert_eq!(role_of(&store, Some(&session("ghost"))).await, Role::Reader);
    assert!(!Role::Reader.can_edit_novels());
    assert!(Role::Admin.can_edit_novels());
}

#[tokio::test]
async fn admin_lookup_failure_never_grants_admin() {
    let local = seeded_store().await;
    let store = Store::Sqlite(local.clone());
    sqlx::query(r#"DROP TABLE "Users""#)
        .execute(local.pool())
        .await
        .unwrap();
    assert_eq!(role_of(&store, Some(&session(ADMIN))).await, Role::Reader);
}

#[tokio::test]
async fn page_gates_widgets_on_session_and_admin() {
    let store = Store::Sqlite(seeded_store().await);

    let anonymous = NovelPage::load(&store, None, "1").await.unwrap();
    assert!(anonymous.library.is_none());
    assert!(anonymous.editor.is_none());

    let reader = session(READER);
    let as_reader = NovelPage::load(&store, Some(&reader), "1").await.unwrap();
    assert!(as_reader.library.is_some());
    assert!(as_reader.editor.is_none());

    let admin = session(ADMIN);
    let as_admin = NovelPage::load(&store, Some(&admin), "1").await.unwrap();
    assert!(as_admin.library.is_some());
    assert_eq!(as_admin.editor.as_ref().map(|e| e.id()), Some(1));
}

#[tokio::test]
async fn books_keep_the_order_the_store_returns() {
    let store = Store::Sqlite(seeded_store().await);
    let page = NovelPage::load(&store, None, "1").await.unwrap();
    let volumes: Vec<i64> = page.books.iter().map(|b| b.volume).collect();
    assert_eq!(volumes, vec![2, 1]);

    let lonely = NovelPage::load(&store, None, "7").await.unwrap();
    assert!(lonely.books.is_empty());
}

#[tokio::test]
async fn failed_book_lookup_leaves_the_list_empty() {
    let local = seeded_store().await;
    let store = Store::Sqlite(local.clone());
    sqlx::query(r#"DROP TABLE "Books""#)
        .execute(local.pool())
        .await
        .unwrap();
    let page = NovelPage::load(&store, None, "1").await.unwrap();
    assert!(page.books.is_empty());
    assert_eq!(page.novel.id, 1);
}

#[tokio::test]
async fn edit_updates_exactly_one_novel() {
    let local = seeded_store().await;
    let store = Store::Sqlite(local.clone());
    let before_other = store.novel(8).await.unwrap().unwrap();
    let novel = store.novel(7).await.unwrap().unwrap();

    let mut editor = NovelEditWidget::new(&novel);
    assert_eq!(editor.draft(), &NovelPatch::from(&novel));

    let updated = editor
        .update(
            &store,
            NovelPatch {
                title: "T2".into(),
                author: "A2".into(),
                cover: "C2".into(),
                description: "D2".into(),
            },
        )
        .await
        .expect("update failed");

    let stored = store.novel(7).await.unwrap().unwrap();
    assert_eq!(updated, stored);
    assert_eq!(stored.title, "T2");
    assert_eq!(stored.author, "A2");
    assert_eq!(stored.cover, "C2");
    assert_eq!(stored.description, "D2");
    assert_eq!(stored.chapters, novel.chapters);
    assert_eq!(store.novel(8).await.unwrap().unwrap(), before_other);
}

#[tokio::test]
async fn edit_rejects_blank_fields_without_writing() {
    let store = Store::Sqlite(seeded_store().await);
    let novel = store.novel(7).await.unwrap().unwrap();
    let mut editor = NovelEditWidget::new(&novel);

    let err = editor
        .update(
            &store,
            NovelPatch {
                title: "".into(),
                ..NovelPatch::from(&novel)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, NovellaError::InvalidForm(_)));
    assert_eq!(store.novel(7).await.unwrap().unwrap(), novel);
}
