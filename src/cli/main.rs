mod file_store;
mod session;

use clap::Parser;
use file_store::FileStore;
use n_in_a_row::persist::snapshot::Snapshot;
use session::Session;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Play N-in-a-row in the terminal. Quitting saves the game; the next run resumes it.
#[derive(Parser, Debug)]
#[command(name = "n_in_a_row_cli", version)]
struct Args {
    /// JSON file used as the game's local storage.
    #[arg(long, default_value = "n_in_a_row_save.json")]
    save_file: PathBuf,

    /// Ignore any saved game and set up a new one.
    #[arg(long)]
    fresh: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stderr keeps log lines off the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut store = match FileStore::open(&args.save_file) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("cannot use save file {}: {err}", args.save_file.display());
            return ExitCode::FAILURE;
        }
    };

    if args.fresh && Snapshot::is_resumable(&store) {
        info!(path = %store.path().display(), "discarding saved game");
        if let Err(err) = Snapshot::discard_board(&mut store) {
            warn!(%err, "could not discard saved game");
        }
    }

    println!("program begin");
    let mut session = Session::start(store);
    session.interpretation_loop();
    println!("program end");
    ExitCode::SUCCESS
}
