// src/state.rs
use std::sync::Arc;

use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

#[derive(Debug, Default)]
pub struct AppState {
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new() -> Self {
        Self { sessions: SessionManager::new() }
    }

    pub fn shared() -> SharedState {
        Arc::new(Self::new())
    }
}
