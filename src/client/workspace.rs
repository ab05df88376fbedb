use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use super::api::ApiClient;
use super::error::ClientResult;
use super::store::{Selection, WorkspaceState};
use crate::config::ClientConfig;
use crate::message::{ChatResponse, Memo, Session, Todo};

/// The user-facing actions over sessions, memos, todos and chat.
///
/// Cloning shares the same state. The lock is never held across a network
/// call, so concurrent actions land in the order their responses arrive.
/// Scoped results (lists, created/updated/deleted items) are tagged with the
/// session they were requested for and dropped if the selection has moved on.
#[derive(Debug, Clone)]
pub struct Workspace {
    api: ApiClient,
    state: Arc<RwLock<WorkspaceState>>,
    chats_in_flight: Arc<AtomicUsize>,
}

/// Counts one chat request as in flight until dropped, so the count also
/// drops when the request future is cancelled.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Workspace {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(WorkspaceState::default())),
            chats_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ApiClient::from_config(config))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn snapshot(&self) -> WorkspaceState {
        self.state.read().await.clone()
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.state.read().await.sessions.clone()
    }

    pub async fn selected(&self) -> Option<String> {
        self.state.read().await.selected.clone()
    }

    pub async fn selected_session(&self) -> Option<Session> {
        self.state.read().await.selected_session().cloned()
    }

    pub async fn memos(&self) -> Vec<Memo> {
        self.state.read().await.memos.items().to_vec()
    }

    pub async fn todos(&self) -> Vec<Todo> {
        self.state.read().await.todos.items().to_vec()
    }

    pub async fn chat(&self) -> Option<ChatResponse> {
        self.state.read().await.chat.clone()
    }

    /// True while any chat request is outstanding.
    pub async fn is_chat_loading(&self) -> bool {
        self.chats_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Replaces the directory with the server's list, selecting the first
    /// session if nothing was selected yet.
    pub async fn reload_sessions(&self) -> ClientResult<()> {
        let fetched = self.api.list_sessions().await?;
        let change = self.state.write().await.load_sessions(fetched);
        self.follow_selection(change).await
    }

    /// Creates a session and selects it. Blank titles are ignored.
    pub async fn create_session(&self, title: &str) -> ClientResult<Option<Session>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let session = self.api.create_session(title).await?;
        tracing::debug!(session_id = %session.id, "session created");
        let change = self.state.write().await.add_session(session.clone());
        self.follow_selection(change).await?;
        Ok(Some(session))
    }

    /// Clearing the selection empties the lists; selecting another id
    /// fetches its memos and todos.
    pub async fn select_session(&self, session_id: Option<String>) -> ClientResult<()> {
        let change = self.state.write().await.select(session_id);
        self.follow_selection(change).await
    }

    /// Re-fetches both lists for the current selection.
    pub async fn refresh_lists(&self) -> ClientResult<()> {
        match self.selected().await {
            Some(id) => self.load_lists(&id).await,
            None => Ok(()),
        }
    }

    async fn follow_selection(&self, change: Selection) -> ClientResult<()> {
        match change {
            Selection::Changed(id) => self.load_lists(&id).await,
            Selection::Cleared | Selection::Unchanged => Ok(()),
        }
    }

    async fn load_lists(&self, session_id: &str) -> ClientResult<()> {
        let (memos, todos) = tokio::join!(self.load_memos(session_id), self.load_todos(session_id));
        memos.and(todos)
    }

    async fn load_memos(&self, session_id: &str) -> ClientResult<()> {
        let memos = self.api.list_memos(session_id).await?;
        self.apply_scoped(session_id, |state| state.memos.reset(memos)).await;
        Ok(())
    }

    async fn load_todos(&self, session_id: &str) -> ClientResult<()> {
        let todos = self.api.list_todos(session_id).await?;
        self.apply_scoped(session_id, |state| state.todos.reset(todos)).await;
        Ok(())
    }

    async fn apply_scoped<F>(&self, session_id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut WorkspaceState),
    {
        let mut state = self.state.write().await;
        if !state.is_current(session_id) {
            tracing::debug!(session_id, "selection moved on; discarding result");
            return false;
        }
        apply(&mut state);
        true
    }

    pub async fn memo_draft(&self) -> String {
        self.state.read().await.memos.draft().to_string()
    }

    pub async fn set_memo_draft(&self, text: impl Into<String>) {
        self.state.write().await.memos.set_draft(text);
    }

    pub async fn begin_memo_edit(&self, memo_id: &str) {
        self.state.write().await.memos.begin_edit(memo_id);
    }

    pub async fn cancel_memo_edit(&self) {
        self.state.write().await.memos.cancel_edit();
    }

    pub async fn editing_memo(&self) -> Option<String> {
        self.state.read().await.memos.editing().map(str::to_string)
    }

    /// Needs a selected session and non-blank content; otherwise nothing
    /// is sent and `None` is returned.
    pub async fn create_memo(&self, content: &str) -> ClientResult<Option<Memo>> {
        let content = content.trim();
        let Some(session_id) = self.selected().await else {
            return Ok(None);
        };
        if content.is_empty() {
            return Ok(None);
        }

        let memo = self.api.create_memo(&session_id, content).await?;
        let item = memo.clone();
        self.apply_scoped(&session_id, |state| state.memos.prepend(item)).await;
        Ok(Some(memo))
    }

    /// Creates a memo from the current draft.
    pub async fn submit_memo_draft(&self) -> ClientResult<Option<Memo>> {
        let draft = self.memo_draft().await;
        self.create_memo(&draft).await
    }

    pub async fn update_memo(&self, memo_id: &str, content: &str) -> ClientResult<Option<Memo>> {
        let Some(session_id) = self.selected().await else {
            return Ok(None);
        };

        let memo = self.api.update_memo(&session_id, memo_id, content).await?;
        let item = memo.clone();
        self.apply_scoped(&session_id, |state| {
            state.memos.replace(item);
        })
        .await;
        Ok(Some(memo))
    }

    /// Returns false when there was no selection to scope the call to.
    pub async fn delete_memo(&self, memo_id: &str) -> ClientResult<bool> {
        let Some(session_id) = self.selected().await else {
            return Ok(false);
        };

        self.api.delete_memo(&session_id, memo_id).await?;
        self.apply_scoped(&session_id, |state| {
            state.memos.remove(memo_id);
        })
        .await;
        Ok(true)
    }

    pub async fn todo_draft(&self) -> String {
        self.state.read().await.todos.draft().to_string()
    }

    pub async fn set_todo_draft(&self, text: impl Into<String>) {
        self.state.write().await.todos.set_draft(text);
    }

    pub async fn begin_todo_edit(&self, todo_id: &str) {
        self.state.write().await.todos.begin_edit(todo_id);
    }

    pub async fn cancel_todo_edit(&self) {
        self.state.write().await.todos.cancel_edit();
    }

    pub async fn editing_todo(&self) -> Option<String> {
        self.state.read().await.todos.editing().map(str::to_string)
    }

    pub async fn create_todo(&self, title: &str) -> ClientResult<Option<Todo>> {
        let title = title.trim();
        let Some(session_id) = self.selected().await else {
            return Ok(None);
        };
        if title.is_empty() {
            return Ok(None);
        }

        let todo = self.api.create_todo(&session_id, title).await?;
        let item = todo.clone();
        self.apply_scoped(&session_id, |state| state.todos.prepend(item)).await;
        Ok(Some(todo))
    }

    pub async fn submit_todo_draft(&self) -> ClientResult<Option<Todo>> {
        let draft = self.todo_draft().await;
        self.create_todo(&draft).await
    }

    /// Sends the new title together with the `done` flag as it is in the
    /// local list right now (`false` if the todo is not listed).
    pub async fn update_todo(&self, todo_id: &str, title: &str) -> ClientResult<Option<Todo>> {
        let (session_id, done) = {
            let state = self.state.read().await;
            let Some(session_id) = state.selected.clone() else {
                return Ok(None);
            };
            let done = state.todos.get(todo_id).is_some_and(|t| t.done);
            (session_id, done)
        };

        let todo = self.api.update_todo(&session_id, todo_id, title, done).await?;
        let item = todo.clone();
        self.apply_scoped(&session_id, |state| {
            state.todos.replace(item);
        })
        .await;
        Ok(Some(todo))
    }

    /// The server decides the new `done` value; the local copy is replaced
    /// with whatever it returns.
    pub async fn toggle_todo(&self, todo_id: &str) -> ClientResult<Option<Todo>> {
        let Some(session_id) = self.selected().await else {
            return Ok(None);
        };

        let todo = self.api.toggle_todo(&session_id, todo_id).await?;
        let item = todo.clone();
        self.apply_scoped(&session_id, |state| {
            state.todos.replace(item);
        })
        .await;
        Ok(Some(todo))
    }

    pub async fn delete_todo(&self, todo_id: &str) -> ClientResult<bool> {
        let Some(session_id) = self.selected().await else {
            return Ok(false);
        };

        self.api.delete_todo(&session_id, todo_id).await?;
        self.apply_scoped(&session_id, |state| {
            state.todos.remove(todo_id);
        })
        .await;
        Ok(true)
    }

    /// One prompt/response round trip, scoped to the selected session if
    /// any. The previous result is replaced, not appended to. The loading
    /// flag is released on success, failure, and when the future is dropped.
    pub async fn send_chat(&self, prompt: &str) -> ClientResult<Option<ChatResponse>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(None);
        }

        let in_flight = InFlight::enter(&self.chats_in_flight);
        let session_id = self.selected().await;
        let result = self.api.chat(prompt, session_id).await;
        drop(in_flight);

        let response = result?;
        self.state.write().await.chat = Some(response.clone());
        Ok(Some(response))
    }
}
