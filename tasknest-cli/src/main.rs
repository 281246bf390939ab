//! Standalone `tasknest` CLI binary.
//!
//! Single-user task management over a local SQLite database file:
//!
//! ```text
//! tasknest add --user alice "Buy groceries"
//! tasknest list --user alice
//! ```
//!
//! The database path comes from the `TASKNEST_DB` environment variable and
//! defaults to `tasknest.db` in the working directory.
//!
//! Exit codes: 0 on success, 1 on validation or database failure, 2 on a
//! usage error (missing required argument).

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;
mod error;
mod store;
mod validate;

use error::CliError;

#[derive(Parser, Debug)]
#[command(
    name = "tasknest",
    version,
    about = "A simple task management CLI",
    long_about = "TaskNest CLI: manage per-user todo items in a local file-backed store."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a new task
    Add {
        /// User ID for task ownership
        #[arg(long)]
        user: String,

        /// The task description (1-200 characters)
        title: String,
    },
    /// List a user's tasks, oldest first
    List {
        /// User ID whose tasks to list
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add { user, title } => commands::add::run(&user, &title).await,
        Commands::List { user } => commands::list::run(&user).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Validation(msg)) => {
            eprintln!("Error: {}", msg);
            ExitCode::from(1)
        }
        Err(CliError::Store(e)) => {
            eprintln!("Unexpected error: {}", e);
            ExitCode::from(1)
        }
    }
}
