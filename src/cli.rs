//! CLI interface for wip.
//!
//! Every invocation opens the log, performs at most one mutation, and prints
//! the resulting stack, top first:
//!
//! ```text
//! $ wip push write the release notes
//! 0: write the release notes
//! 1: fix flaky test
//! ```

mod format;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config;
use crate::model::Item;
use crate::storage::LogStore;

/// wip: a stack of what you are working on.
#[derive(Debug, Parser)]
#[command(name = "wip", version)]
pub struct Cli {
    /// Log file to use instead of `WIP_FILENAME` or `~/.wip`.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Print how long the invocation took (same as `WIP_TIMING=true`).
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Put a new item on top of the stack.
    ///
    /// All words are joined with single spaces.
    Push {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Drop the top item. Does nothing on an empty stack.
    Pop,

    /// Move the item at INDEX (as shown by `wip show`) to the top.
    Focus { index: u64 },

    /// Show the stack. The default when no command is given.
    Show,
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let start = Instant::now();
    let cli = Cli::parse();
    let settings = config::resolve(cli.file, cli.timing)?;

    let mut store = LogStore::open(&settings.file)
        .map_err(|e| format!("failed to open {}: {e}", settings.file.display()))?;

    match cli.command {
        Some(Command::Push { words }) => cmd_push(&mut store, &words)?,
        Some(Command::Pop) => store
            .append_pop()
            .map_err(|e| format!("failed to pop: {e}"))?,
        Some(Command::Focus { index }) => store
            .append_focus(index)
            .map_err(|e| format!("failed to focus: {e}"))?,
        Some(Command::Show) | None => {}
    }

    let items = store
        .current_list()
        .map_err(|e| format!("failed to replay {}: {e}", store.path().display()))?;
    print!("{}", format::format_list(&items));

    if settings.timing {
        println!("done in {}µs", start.elapsed().as_micros());
    }
    Ok(())
}

fn cmd_push(store: &mut LogStore, words: &[String]) -> Result<(), String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err("nothing to push".to_string());
    }
    store
        .append_push(Item::from(text))
        .map_err(|e| format!("failed to push: {e}"))
}
