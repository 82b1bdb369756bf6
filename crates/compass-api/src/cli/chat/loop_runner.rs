//! Main chat loop.
//!
//! Resolves the session and provider, optionally resumes a saved
//! conversation, then reads input until Ctrl+D or `/exit`. Each message runs
//! one exchange through `ChatOrchestrator::submit`; saving is explicit via
//! `/save`.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use tracing::{info, warn};

use compass_core::chat::orchestrator::ChatOrchestrator;
use compass_types::history::{Conversation, ConversationId, SessionId};
use compass_types::llm::MessageRole;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;
use crate::cli::history::format_relative_time;
use crate::cli::session::current_session;
use crate::cli::spinner;
use crate::state::AppState;

pub async fn run_chat_loop(state: &AppState, resume: Option<String>) -> Result<()> {
    let provider = state.llm()?;
    let session_id = current_session(state).await?;
    let model = state.advisor.model().to_string();
    let renderer = ChatRenderer::new();

    let mut chat = ChatOrchestrator::new();
    let resumed = match resume {
        Some(id) => {
            let conversation = find_conversation(state, &session_id, &id).await?;
            chat.load(&conversation);
            Some(conversation.title)
        }
        None => None,
    };

    print_welcome_banner(&model, session_id.as_str(), resumed.as_deref());
    print_transcript(&chat, &renderer);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, _writer) =
        ChatInput::new(prompt).context("Failed to initialize input")?;

    loop {
        let text = match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(command) = commands::parse(&text) {
            match command {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => input.clear(),
                ChatCommand::Exit => break,
                ChatCommand::New => {
                    chat.reset();
                    println!("\n  {} New conversation.\n", style("✓").green().bold());
                    print_transcript(&chat, &renderer);
                }
                ChatCommand::Save(title) => {
                    if let Err(e) = save(state, &session_id, &mut chat, title.as_deref()).await {
                        eprintln!("\n  {} Failed to save: {e}\n", style("!").red().bold());
                    }
                }
                ChatCommand::History => {
                    if let Err(e) = print_history(state, &session_id).await {
                        eprintln!("\n  {} Failed to load history: {e}\n", style("!").red().bold());
                    }
                }
                ChatCommand::Load(id) => match find_conversation(state, &session_id, &id).await {
                    Ok(conversation) => {
                        chat.load(&conversation);
                        println!(
                            "\n  {} Loaded '{}'.\n",
                            style("✓").green().bold(),
                            style(&conversation.title).cyan()
                        );
                        print_transcript(&chat, &renderer);
                    }
                    Err(e) => eprintln!("\n  {} {e}\n", style("!").red().bold()),
                },
                ChatCommand::Export(path) => match export(&chat, path).await {
                    Ok(path) => println!(
                        "\n  {} Transcript written to {}\n",
                        style("✓").green().bold(),
                        style(path.display()).cyan()
                    ),
                    Err(e) => eprintln!("\n  {} Export failed: {e}\n", style("!").red().bold()),
                },
                ChatCommand::Unknown(name) => println!(
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                ),
            }
            continue;
        }

        let spinner = spinner("thinking...");
        let start = Instant::now();
        let mut first_token = true;

        let result = chat
            .submit(&state.advisor, &provider, &text, |token| {
                if first_token {
                    first_token = false;
                    spinner.finish_and_clear();
                    print!("\n  {} ", style("Advisor").cyan().bold());
                    let _ = std::io::stdout().flush();
                }
                renderer.print_streaming_token(token);
            })
            .await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                let response_ms = start.elapsed().as_millis() as u64;
                println!();
                renderer.print_stats_footer(reply.content.chars().count(), response_ms, &model);
                println!();
            }
            Err(e) => {
                warn!(error = %e, "Chat exchange failed");
                eprintln!("\n  {} {e}", style("!").red().bold());
                eprintln!("  {}", style("Type a message to try again, /exit to quit.").dim());
            }
        }
    }

    if !chat.unsaved().is_empty() && chat.has_exchange() {
        println!(
            "\n  {}",
            style("Unsaved messages were discarded. Use /save before exiting to keep them.").dim()
        );
    }
    println!("\n  {}", style("Session ended.").dim());
    Ok(())
}

/// Save new messages: the first save creates a conversation, later saves
/// append to it.
async fn save(
    state: &AppState,
    session_id: &SessionId,
    chat: &mut ChatOrchestrator,
    title: Option<&str>,
) -> Result<()> {
    if !chat.has_exchange() {
        println!("\n  {} Nothing to save yet.\n", style("i").blue().bold());
        return Ok(());
    }
    if chat.unsaved().is_empty() {
        println!("\n  {} Already saved.\n", style("i").blue().bold());
        return Ok(());
    }

    match chat.saved_conversation() {
        Some(conversation_id) => {
            state
                .history_service
                .append_messages(session_id, &conversation_id, chat.unsaved())
                .await?;
            chat.mark_saved(conversation_id);
            info!(conversation_id = %conversation_id, "Conversation updated");
            println!("\n  {} Conversation updated.\n", style("✓").green().bold());
        }
        None => {
            let conversation = state
                .history_service
                .save_conversation(session_id, chat.messages(), title)
                .await?;
            chat.mark_saved(conversation.id);
            println!(
                "\n  {} Saved as '{}'.\n",
                style("✓").green().bold(),
                style(&conversation.title).cyan()
            );
        }
    }
    Ok(())
}

async fn find_conversation(
    state: &AppState,
    session_id: &SessionId,
    raw_id: &str,
) -> Result<Conversation> {
    let id: ConversationId = raw_id
        .trim()
        .parse()
        .with_context(|| format!("'{raw_id}' is not a conversation ID"))?;
    state
        .history_service
        .load_history(session_id)
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .with_context(|| format!("No saved conversation {id} in this session"))
}

async fn print_history(state: &AppState, session_id: &SessionId) -> Result<()> {
    let history = state.history_service.load_history(session_id).await?;
    println!();
    if history.is_empty() {
        println!("  {} No saved conversations.", style("i").blue().bold());
    }
    for conversation in &history {
        println!(
            "  {}  {}  {}",
            style(conversation.id).dim(),
            style(&conversation.title).cyan(),
            style(format_relative_time(&conversation.updated_at)).dim()
        );
    }
    println!();
    Ok(())
}

async fn export(chat: &ChatOrchestrator, path: Option<String>) -> Result<PathBuf> {
    let path = path.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(format!(
            "career-chat-{}.txt",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    });
    tokio::fs::write(&path, chat.export_text()).await?;
    Ok(path)
}

fn print_transcript(chat: &ChatOrchestrator, renderer: &ChatRenderer) {
    for message in chat.messages() {
        let label = match message.role {
            MessageRole::User => style("You").green().bold(),
            _ => style("Advisor").cyan().bold(),
        };
        println!("  {label}");
        println!("  {}", renderer.render_final(&message.content).trim());
        println!();
    }
}
