mod cli;
mod config;
mod model;
mod replay;
mod storage;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    if let Err(e) = cli::run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays the rendered stack.
/// The filter comes from `WIP_LOG` (e.g. `WIP_LOG=debug`), default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("WIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
