pub mod chatbot;
pub mod session_manager;
