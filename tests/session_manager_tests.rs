use notionlike_trading::services::session_manager::{SessionManager, SessionNotFound};

#[tokio::test]
async fn sessions_are_listed_newest_first() {
    let mgr = SessionManager::new();
    let first = mgr.create_session("first").await;
    let second = mgr.create_session("second").await;

    let ids: Vec<_> = mgr.list_sessions().await.into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(mgr.len().await, 2);
}

#[tokio::test]
async fn memos_are_scoped_to_their_session() {
    let mgr = SessionManager::new();
    let a = mgr.create_session("a").await;
    let b = mgr.create_session("b").await;

    mgr.create_memo(&a.id, "only in a").await.unwrap();
    assert_eq!(mgr.list_memos(&a.id).await.unwrap().len(), 1);
    assert!(mgr.list_memos(&b.id).await.unwrap().is_empty());
    assert!(mgr.list_memos("missing").await.is_none());
    assert!(mgr.create_memo("missing", "x").await.is_none());
}

#[tokio::test]
async fn update_memo_reports_what_is_missing() {
    let mgr = SessionManager::new();
    let s = mgr.create_session("s").await;
    let memo = mgr.create_memo(&s.id, "old").await.unwrap();

    let updated = mgr.update_memo(&s.id, &memo.id, "new").await.unwrap().unwrap();
    assert_eq!(updated.id, memo.id);
    assert_eq!(updated.content, "new");

    assert_eq!(mgr.update_memo(&s.id, "nope", "x").await, Ok(None));
    assert_eq!(mgr.update_memo("nope", &memo.id, "x").await, Err(SessionNotFound));
}

#[tokio::test]
async fn todo_toggle_flips_done() {
    let mgr = SessionManager::new();
    let s = mgr.create_session("s").await;
    let todo = mgr.create_todo(&s.id, "check earnings").await.unwrap();
    assert!(!todo.done);

    let toggled = mgr.toggle_todo(&s.id, &todo.id).await.unwrap().unwrap();
    assert!(toggled.done);
    let toggled = mgr.toggle_todo(&s.id, &todo.id).await.unwrap().unwrap();
    assert!(!toggled.done);
}

#[tokio::test]
async fn todo_update_sets_title_and_done() {
    let mgr = SessionManager::new();
    let s = mgr.create_session("s").await;
    let todo = mgr.create_todo(&s.id, "a").await.unwrap();

    let updated = mgr.update_todo(&s.id, &todo.id, "b", true).await.unwrap().unwrap();
    assert_eq!(updated.title, "b");
    assert!(updated.done);
    assert_eq!(mgr.list_todos(&s.id).await.unwrap(), vec![updated]);

    assert_eq!(mgr.delete_todo(&s.id, &todo.id).await, Ok(true));
    assert_eq!(mgr.delete_todo(&s.id, &todo.id).await, Ok(false));
}

#[tokio::test]
async fn counts_follow_contents() {
    let mgr = SessionManager::new();
    let s = mgr.create_session("s").await;
    mgr.create_memo(&s.id, "m").await.unwrap();
    mgr.create_todo(&s.id, "t1").await.unwrap();
    mgr.create_todo(&s.id, "t2").await.unwrap();

    assert_eq!(mgr.counts(&s.id).await, Some((1, 2)));
    assert_eq!(mgr.counts("missing").await, None);
}
