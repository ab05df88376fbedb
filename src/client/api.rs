use reqwest::{
    Client, Method, Response,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::error::{ClientError, ClientResult};
use crate::config::ClientConfig;
use crate::message::{
    ChatRequest, ChatResponse, CreateMemo, CreateSession, CreateTodo, Memo, Ping, Session, Todo,
    UpdateMemo, UpdateTodo,
};

/// Message used when a failed response carries no body.
pub const REQUEST_FAILED: &str = "request failed";

/// Method, JSON body and extra headers for one call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: Client::new(), base_url }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issues the call and turns any non-2xx answer into
    /// [`ClientError::RequestFailed`]. `Content-Type: application/json` is
    /// always sent and wins over a caller-supplied content type.
    async fn send(&self, path: &str, options: RequestOptions) -> ClientResult<Response> {
        let RequestOptions { method, body, mut headers } = options;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(%method, path, "api request");
        let mut builder = self.http.request(method.clone(), self.url(path)).headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() { REQUEST_FAILED.to_string() } else { text };
        tracing::warn!(%method, path, %status, "api request failed: {}", message);
        Err(ClientError::RequestFailed { status: status.as_u16(), message })
    }

    /// Performs the call and parses the body as `T`. Nothing beyond JSON
    /// parsing is checked.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let bytes = self.send(path, options).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`request`](Self::request) for endpoints that answer without a body.
    pub async fn request_no_content(&self, path: &str, options: RequestOptions) -> ClientResult<()> {
        self.send(path, options).await.map(drop)
    }

    pub async fn ping(&self) -> ClientResult<Ping> {
        self.request("/api/ping", RequestOptions::get()).await
    }

    pub async fn list_sessions(&self) -> ClientResult<Vec<Session>> {
        self.request("/sessions", RequestOptions::get()).await
    }

    pub async fn create_session(&self, title: &str) -> ClientResult<Session> {
        let body = CreateSession { title: title.to_string() };
        self.request("/sessions", RequestOptions::post().json(&body)?).await
    }

    pub async fn list_memos(&self, session_id: &str) -> ClientResult<Vec<Memo>> {
        self.request(&format!("/sessions/{session_id}/memos"), RequestOptions::get())
            .await
    }

    pub async fn create_memo(&self, session_id: &str, content: &str) -> ClientResult<Memo> {
        let body = CreateMemo { content: content.to_string() };
        self.request(
            &format!("/sessions/{session_id}/memos"),
            RequestOptions::post().json(&body)?,
        )
        .await
    }

    pub async fn update_memo(
        &self,
        session_id: &str,
        memo_id: &str,
        content: &str,
    ) -> ClientResult<Memo> {
        let body = UpdateMemo { content: content.to_string() };
        self.request(
            &format!("/sessions/{session_id}/memos/{memo_id}"),
            RequestOptions::patch().json(&body)?,
        )
        .await
    }

    pub async fn delete_memo(&self, session_id: &str, memo_id: &str) -> ClientResult<()> {
        self.request_no_content(
            &format!("/sessions/{session_id}/memos/{memo_id}"),
            RequestOptions::delete(),
        )
        .await
    }

    pub async fn list_todos(&self, session_id: &str) -> ClientResult<Vec<Todo>> {
        self.request(&format!("/sessions/{session_id}/todos"), RequestOptions::get())
            .await
    }

    pub async fn create_todo(&self, session_id: &str, title: &str) -> ClientResult<Todo> {
        let body = CreateTodo { title: title.to_string() };
        self.request(
            &format!("/sessions/{session_id}/todos"),
            RequestOptions::post().json(&body)?,
        )
        .await
    }

    pub async fn update_todo(
        &self,
        session_id: &str,
        todo_id: &str,
        title: &str,
        done: bool,
    ) -> ClientResult<Todo> {
        let body = UpdateTodo { title: title.to_string(), done };
        self.request(
            &format!("/sessions/{session_id}/todos/{todo_id}"),
            RequestOptions::patch().json(&body)?,
        )
        .await
    }

    pub async fn toggle_todo(&self, session_id: &str, todo_id: &str) -> ClientResult<Todo> {
        self.request(
            &format!("/sessions/{session_id}/todos/{todo_id}/toggle"),
            RequestOptions::post(),
        )
        .await
    }

    pub async fn delete_todo(&self, session_id: &str, todo_id: &str) -> ClientResult<()> {
        self.request_no_content(
            &format!("/sessions/{session_id}/todos/{todo_id}"),
            RequestOptions::delete(),
        )
        .await
    }

    pub async fn chat(&self, prompt: &str, session_id: Option<String>) -> ClientResult<ChatResponse> {
        let body = ChatRequest { prompt: prompt.to_string(), session_id };
        self.request("/chat", RequestOptions::post().json(&body)?).await
    }
}
