//! Connects to the backend named by `API_BASE_URL` and reports what the
//! workspace sees after loading the session directory.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notionlike_trading::{client::Workspace, config::ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let workspace = Workspace::from_config(&config);

    let ping = workspace
        .api()
        .ping()
        .await
        .with_context(|| format!("backend at {} is not reachable", config.base_url))?;
    tracing::info!(base_url = %config.base_url, reply = %ping.message, "backend reachable");

    workspace.reload_sessions().await.context("loading sessions")?;
    let sessions = workspace.sessions().await;
    tracing::info!(count = sessions.len(), "sessions loaded");

    match workspace.selected_session().await {
        Some(session) => tracing::info!(
            title = %session.title,
            memos = workspace.memos().await.len(),
            todos = workspace.todos().await.len(),
            "selected session"
        ),
        None => tracing::info!("no sessions yet"),
    }
    Ok(())
}
