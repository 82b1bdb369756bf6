//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner shown when a chat starts: model, session and a hint
/// about slash commands.
pub fn print_welcome_banner(model: &str, session_id: &str, resumed: Option<&str>) {
    println!();
    println!("  🧭 {}", style("Career Advisor").cyan().bold());
    println!(
        "  {}",
        style("Career guidance, job search tips and skill development advice").dim()
    );
    println!();
    println!("  {}    {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Session:").bold(), style(session_id).dim());
    if let Some(title) = resumed {
        println!("  {}  {}", style("Resumed:").bold(), style(title).dim());
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
