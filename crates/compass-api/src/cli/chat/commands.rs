//! Slash command parsing and help text for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// Start a new conversation.
    New,
    /// Save the conversation to history, with an optional title.
    Save(Option<String>),
    /// List saved conversations.
    History,
    /// Replace the conversation with a saved one.
    Load(String),
    /// Write a plain-text transcript, optionally to the given path.
    Export(Option<String>),
    Unknown(String),
}

/// Parse user input as a slash command. `None` if it doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, Some(rest.trim()).filter(|a| !a.is_empty())),
        None => (trimmed, None),
    };

    let command = match cmd.to_lowercase().as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" => ChatCommand::New,
        "/save" => ChatCommand::Save(arg.map(str::to_string)),
        "/history" => ChatCommand::History,
        "/load" => match arg {
            Some(id) => ChatCommand::Load(id.to_string()),
            None => ChatCommand::Unknown("/load requires a conversation ID".to_string()),
        },
        "/export" => ChatCommand::Export(arg.map(str::to_string)),
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat"),
        ("/new", "Start a new conversation"),
        ("/save [title]", "Save this conversation to history"),
        ("/history", "List saved conversations"),
        ("/load <id>", "Continue a saved conversation"),
        ("/export [path]", "Write a plain-text transcript"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (command, description) in rows {
        println!("  {:<16}{}", style(command).cyan(), description);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit, Ctrl+C is safe").dim());
    println!();
}
