/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, LangArg};
pub use commands::{chat, handle_command, list_models, read_history, summarize};
