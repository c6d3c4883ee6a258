//! Fair Dice
//!
//! Console front end: parses arguments, sets up logging, runs one game and
//! maps its outcome to an exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fair_dice::{
    console::StdConsole, game::opponent::HonestOpponent, GameConfig, GameError, GameSession,
    OsEntropy, VERSION,
};

/// Provably-fair non-transitive dice game.
#[derive(Parser, Debug)]
#[command(name = "fair-dice", version, about)]
struct Cli {
    /// Dice as comma-separated faces, at least three, e.g. 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7
    #[arg(value_name = "DIE")]
    dice: Vec<String>,

    /// Reveal commitments without waiting for Enter.
    #[arg(long)]
    no_pause: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the game on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = GameConfig::from_env();
    if cli.no_pause {
        config.pause_before_reveal = false;
    }
    info!("Fair Dice v{}", VERSION);

    let opponent = HonestOpponent::with_secret_len(OsEntropy, config.secret_len);
    let mut session = match GameSession::from_args(config, cli.dice.as_slice(), opponent, StdConsole) {
        Ok(session) => session,
        Err(e) => return fail(e),
    };

    match session.play() {
        Ok(_) => ExitCode::SUCCESS,
        Err(GameError::Quit) => {
            println!("Goodbye.");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail(err: GameError) -> ExitCode {
    // Integrity failures carry their own error event from the session.
    debug!(code = err.exit_code(), "game aborted");
    eprintln!("Error: {}", err);
    ExitCode::from(err.exit_code() as u8)
}
