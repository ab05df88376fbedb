// src/services/session_manager.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::message::{Memo, Session, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session not found")]
pub struct SessionNotFound;

#[derive(Clone, Debug)]
struct SessionEntry {
    session: Session,
    memos: Vec<Memo>,
    todos: Vec<Todo>,
}

impl SessionEntry {
    fn new(title: impl Into<String>) -> Self {
        Self {
            session: Session { id: new_id(), title: title.into() },
            memos: Vec::new(),
            todos: Vec::new(),
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory store of sessions and the memos and todos they own.
/// Every list is kept newest first.
#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<RwLock<Vec<SessionEntry>>>,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_sessions(&self) -> Vec<Session> {
        let guard = self.inner.read().await;
        guard.iter().map(|e| e.session.clone()).collect()
    }

    // Create a fresh session and return it.
    pub async fn create_session(&self, title: impl Into<String>) -> Session {
        let entry = SessionEntry::new(title);
        let session = entry.session.clone();

        let mut guard = self.inner.write().await;
        guard.insert(0, entry);
        session
    }

    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let guard = self.inner.read().await;
        find(&guard, session_id).map(|e| e.session.clone())
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Memo and todo counts for a session, used as chat context.
    pub async fn counts(&self, session_id: &str) -> Option<(usize, usize)> {
        let guard = self.inner.read().await;
        guard
            .iter()
            .find(|e| e.session.id == session_id)
            .map(|e| (e.memos.len(), e.todos.len()))
    }

    pub async fn list_memos(&self, session_id: &str) -> Option<Vec<Memo>> {
        let guard = self.inner.read().await;
        find(&guard, session_id).map(|e| e.memos.clone())
    }

    pub async fn create_memo(&self, session_id: &str, content: impl Into<String>) -> Option<Memo> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id)?;
        let memo = Memo { id: new_id(), content: content.into() };
        entry.memos.insert(0, memo.clone());
        Some(memo)
    }

    /// `Err` means the session is missing, `Ok(None)` that the memo is.
    pub async fn update_memo(
        &self,
        session_id: &str,
        memo_id: &str,
        content: impl Into<String>,
    ) -> Result<Option<Memo>, SessionNotFound> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id).ok_or(SessionNotFound)?;
        Ok(entry.memos.iter_mut().find(|m| m.id == memo_id).map(|memo| {
            memo.content = content.into();
            memo.clone()
        }))
    }

    pub async fn delete_memo(&self, session_id: &str, memo_id: &str) -> Result<bool, SessionNotFound> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id).ok_or(SessionNotFound)?;
        let before = entry.memos.len();
        entry.memos.retain(|m| m.id != memo_id);
        Ok(entry.memos.len() != before)
    }

    pub async fn list_todos(&self, session_id: &str) -> Option<Vec<Todo>> {
        let guard = self.inner.read().await;
        find(&guard, session_id).map(|e| e.todos.clone())
    }

    pub async fn create_todo(&self, session_id: &str, title: impl Into<String>) -> Option<Todo> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id)?;
        let todo = Todo { id: new_id(), title: title.into(), done: false };
        entry.todos.insert(0, todo.clone());
        Some(todo)
    }

    pub async fn update_todo(
        &self,
        session_id: &str,
        todo_id: &str,
        title: impl Into<String>,
        done: bool,
    ) -> Result<Option<Todo>, SessionNotFound> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id).ok_or(SessionNotFound)?;
        Ok(entry.todos.iter_mut().find(|t| t.id == todo_id).map(|todo| {
            todo.title = title.into();
            todo.done = done;
            todo.clone()
        }))
    }

    pub async fn toggle_todo(&self, session_id: &str, todo_id: &str) -> Result<Option<Todo>, SessionNotFound> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id).ok_or(SessionNotFound)?;
        Ok(entry.todos.iter_mut().find(|t| t.id == todo_id).map(|todo| {
            todo.done = !todo.done;
            todo.clone()
        }))
    }

    pub async fn delete_todo(&self, session_id: &str, todo_id: &str) -> Result<bool, SessionNotFound> {
        let mut guard = self.inner.write().await;
        let entry = find_mut(&mut guard, session_id).ok_or(SessionNotFound)?;
        let before = entry.todos.len();
        entry.todos.retain(|t| t.id != todo_id);
        Ok(entry.todos.len() != before)
    }
}

fn find<'a>(entries: &'a [SessionEntry], session_id: &str) -> Option<&'a SessionEntry> {
    entries.iter().find(|e| e.session.id == session_id)
}

fn find_mut<'a>(entries: &'a mut [SessionEntry], session_id: &str) -> Option<&'a mut SessionEntry> {
    entries.iter_mut().find(|e| e.session.id == session_id)
}
