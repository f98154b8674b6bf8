//! Arbiter - console front end for two-player chess matches.
//!
//! `arbiter play` runs an interactive match on the terminal. `arbiter replay`
//! applies a list of coordinate moves and prints the final position.

mod config;
mod play;
mod render;
mod replay;

use anyhow::Context;
use arbiter_core::MoveMatrix;
use clap::{Parser, Subcommand};
use config::CliConfig;
use render::Style;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "Two-player chess match arbiter")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value_os_t = CliConfig::default_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive match on the terminal
    Play,
    /// Replay coordinate moves (e2e4, e7e8n, ...) and print the result
    Replay {
        /// Moves in coordinate notation
        #[arg(required = true)]
        moves: Vec<String>,
        /// Print the final match state as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(io::stderr)
        .init();
    tracing::debug!("Config: {:?}", config);

    match cli.command {
        Commands::Play => {
            let stdin = io::stdin();
            let mut session = play::Session::new(stdin.lock(), io::stdout(), &config);
            session.run()?;
        }
        Commands::Replay { moves, json } => {
            let chess_match = replay::replay(&moves)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&chess_match.snapshot())?);
            } else {
                let style = Style {
                    unicode: config.unicode,
                };
                print!("{}", render::board(&chess_match, MoveMatrix::EMPTY, style));
                if config.show_captured {
                    print!("{}", render::captured(&chess_match, style));
                }
                print!("{}", render::status(&chess_match));
            }
        }
    }
    Ok(())
}
