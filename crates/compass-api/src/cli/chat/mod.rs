//! Interactive advisor chat in the terminal.
//!
//! Streams replies token by token, renders the finished reply as markdown,
//! and offers slash commands for saving, loading and exporting
//! conversations. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
