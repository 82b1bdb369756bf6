//! Session identity commands: show and new.
//!
//! The CLI keeps its session identifier in `<data_dir>/session_id`, the same
//! way a browser client keeps one in local storage.

use anyhow::Result;
use console::style;

use compass_core::session::SessionProvider;
use compass_infra::session::file::FileSessionStore;
use compass_types::history::SessionId;

use crate::state::AppState;

fn provider(state: &AppState) -> SessionProvider<FileSessionStore> {
    SessionProvider::new(FileSessionStore::new(&state.data_dir))
}

/// The stored session identifier, created on first use.
pub async fn current_session(state: &AppState) -> Result<SessionId> {
    Ok(provider(state).get_or_create().await?)
}

pub async fn show_session(state: &AppState, json: bool) -> Result<()> {
    let session_id = current_session(state).await?;

    if json {
        println!("{}", serde_json::json!({ "sessionId": session_id }));
    } else {
        println!();
        println!("  {}  {}", style("Session:").bold(), style(&session_id).cyan());
        println!();
    }
    Ok(())
}

pub async fn new_session(state: &AppState, json: bool) -> Result<()> {
    let session_id = provider(state).create_new().await?;

    if json {
        println!("{}", serde_json::json!({ "sessionId": session_id }));
    } else {
        println!(
            "  {} New session {}",
            style("✓").green().bold(),
            style(&session_id).cyan()
        );
        println!(
            "  {}",
            style("Conversations saved under the previous session are no longer listed.").dim()
        );
    }
    Ok(())
}
