use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3100/api/support-triage";

/// Chat with the support triage service from the terminal.
#[derive(Parser, Debug)]
#[command(name = "triage_cli", version, about)]
pub struct Cli {
    /// Forwarding endpoint URL.
    #[arg(long, global = true, env = "TRIAGE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory holding the session id and chat history.
    #[arg(long, global = true, env = "TRIAGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat (`/details`, `/history`, `/clear`, `/quit`).
    Chat,
    /// Send a single message and print the reply.
    Send {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Print the stored conversation.
    History,
    /// Delete the stored conversation.
    Clear,
    /// Print the session id, creating one if needed.
    Session,
    /// Print the version.
    Version,
}
