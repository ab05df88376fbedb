//! Local cache of server state and the transitions applied to it.
//!
//! Nothing here talks to the network: every mutation is a plain method so
//! ordering and id-matching rules can be tested on their own.

use crate::message::{ChatResponse, Identified, Memo, Session, Todo};

/// Items of one kind scoped to the selected session, plus the id being
/// edited and the text of the create input.
#[derive(Debug, Clone)]
pub struct ScopedList<T> {
    items: Vec<T>,
    editing: Option<String>,
    draft: String,
}

impl<T> Default for ScopedList<T> {
    fn default() -> Self {
        Self { items: Vec::new(), editing: None, draft: String::new() }
    }
}

impl<T: Identified> ScopedList<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replaces the contents wholesale with a fresh server snapshot.
    pub fn reset(&mut self, items: Vec<T>) {
        self.items = items;
        let stale = self.editing.as_deref().is_some_and(|id| self.get(id).is_none());
        if stale {
            self.editing = None;
        }
    }

    /// Drops items and edit state. The draft input survives.
    pub fn clear(&mut self) {
        self.items.clear();
        self.editing = None;
    }

    /// New items go first; the create input is emptied.
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
        self.draft.clear();
    }

    /// Swaps the item with the same id in place and leaves edit mode for it.
    /// Returns false if no item matched.
    pub fn replace(&mut self, item: T) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id() == item.id()) else {
            return false;
        };
        self.finish_edit(item.id());
        self.items[pos] = item;
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.finish_edit(id);
        self.items.len() != before
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn begin_edit(&mut self, id: impl Into<String>) {
        self.editing = Some(id.into());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    fn finish_edit(&mut self, id: &str) {
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }
}

/// Outcome of changing the selected session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Unchanged,
    Cleared,
    Changed(String),
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    pub sessions: Vec<Session>,
    pub selected: Option<String>,
    pub memos: ScopedList<Memo>,
    pub todos: ScopedList<Todo>,
    pub chat: Option<ChatResponse>,
}

impl WorkspaceState {
    /// Sets the selection without checking it against `sessions`. Any real
    /// change empties both scoped lists.
    pub fn select(&mut self, id: Option<String>) -> Selection {
        if self.selected == id {
            return Selection::Unchanged;
        }
        self.selected = id.clone();
        self.memos.clear();
        self.todos.clear();
        match id {
            Some(id) => Selection::Changed(id),
            None => Selection::Cleared,
        }
    }

    /// Replaces the directory with a fetched list. The first fetched session
    /// becomes selected only when nothing is selected yet.
    pub fn load_sessions(&mut self, fetched: Vec<Session>) -> Selection {
        let default = match self.selected {
            None => fetched.first().map(|s| s.id.clone()),
            Some(_) => None,
        };
        self.sessions = fetched;
        match default {
            Some(id) => self.select(Some(id)),
            None => Selection::Unchanged,
        }
    }

    /// Prepends a newly created session and selects it.
    pub fn add_session(&mut self, session: Session) -> Selection {
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.select(Some(id))
    }

    /// Whether a result issued for `session_id` still belongs on screen.
    pub fn is_current(&self, session_id: &str) -> bool {
        self.selected.as_deref() == Some(session_id)
    }

    pub fn selected_session(&self) -> Option<&Session> {
        let id = self.selected.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }
}
