//! Saved conversation commands: list, delete, clear.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use compass_core::history::service::DeleteScope;
use compass_types::error::HistoryError;
use compass_types::history::{Conversation, ConversationId};
use compass_types::llm::MessageRole;

use super::session::current_session;
use super::truncate;
use crate::state::AppState;

/// List saved conversations, most recently updated first.
///
/// # Examples
///
/// ```bash
/// compass history list
/// compass history list --json
/// ```
pub async fn list_history(state: &AppState, json: bool) -> Result<()> {
    let session_id = current_session(state).await?;
    let history = state.history_service.load_history(&session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!();
        println!(
            "  {} No saved conversations. Start one with: {}",
            style("i").blue().bold(),
            style("compass chat").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Preview").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for conversation in &history {
        table.add_row(vec![
            Cell::new(conversation.id.to_string()).fg(Color::DarkGrey),
            Cell::new(&conversation.title).fg(Color::Cyan),
            Cell::new(conversation.messages.len()),
            Cell::new(preview(conversation)),
            Cell::new(format_relative_time(&conversation.updated_at)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} conversation{}",
        style(history.len()).bold(),
        if history.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

pub async fn delete_conversation(
    state: &AppState,
    id: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let conversation_id: ConversationId = id
        .parse()
        .with_context(|| format!("'{id}' is not a conversation ID"))?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete conversation {}?", style(id).red().bold()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let deleted = delete(state, DeleteScope::One(conversation_id)).await?;

    if json {
        println!("{}", serde_json::json!({ "success": true, "deleted": deleted }));
    } else if deleted == 0 {
        println!("  {} No conversation {} in this session.", style("i").blue().bold(), id);
    } else {
        println!("  {} Conversation deleted.", style("✓").red().bold());
    }
    Ok(())
}

pub async fn clear_history(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Delete every saved conversation for this session?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let deleted = delete(state, DeleteScope::All).await?;

    if json {
        println!("{}", serde_json::json!({ "success": true, "deleted": deleted }));
    } else {
        println!(
            "  {} Deleted {} conversation{}.",
            style("✓").red().bold(),
            deleted,
            if deleted == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

/// A session that never saved anything has no user record yet; from the
/// terminal that is simply an empty history.
async fn delete(state: &AppState, scope: DeleteScope) -> Result<u64> {
    let session_id = current_session(state).await?;
    match state.history_service.delete_history(&session_id, scope).await {
        Ok(deleted) => Ok(deleted),
        Err(HistoryError::UserNotFound) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// First user message, shortened for a table cell.
fn preview(conversation: &Conversation) -> String {
    conversation
        .messages
        .iter()
        .find(|m| m.role == MessageRole::User)
        .map(|m| truncate(&m.content.replace('\n', " "), 48))
        .unwrap_or_default()
}

/// Format a timestamp as relative time (e.g., "2 hours ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let secs = Utc::now().signed_duration_since(*dt).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => plural(secs / 60, "minute"),
        3600..=86_399 => plural(secs / 3600, "hour"),
        86_400..=2_591_999 => plural(secs / 86_400, "day"),
        _ => dt.format("%Y-%m-%d").to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
