use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Language;

#[derive(Parser, Debug)]
#[command(name = "chatgate")]
#[command(version)]
#[command(about = "Multi-provider LLM chat gateway with fallback and history summaries", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available models
    Models {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send one message to a model
    Chat {
        /// Model id or display name
        #[arg(short, long)]
        model: String,

        /// Response language
        #[arg(short, long, value_enum, default_value_t = LangArg::En)]
        lang: LangArg,

        /// Print the structured result as JSON
        #[arg(long)]
        json: bool,

        /// The message to send
        message: String,
    },
    /// Summarize a chat history file (JSON array of {user_message, ai_response})
    Summarize {
        /// History file
        #[arg(long)]
        history: PathBuf,

        /// Summary language
        #[arg(short, long, value_enum, default_value_t = LangArg::En)]
        lang: LangArg,

        /// Print the structured result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize configuration
    Init,
    /// Check provider configuration and catalog source
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    En,
    Ar,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::En => Language::En,
            LangArg::Ar => Language::Ar,
        }
    }
}
