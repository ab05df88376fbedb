//! Session-scoped notes, todos and a placeholder chat for the NotionLike
//! stock trading workspace: the client synchronization layer and the
//! in-memory backend it talks to.

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
