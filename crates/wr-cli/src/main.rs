//! CLI host for the Wissensrunde minigame engine.
//!
//! Every invocation is one full pass: load the collection and its stored
//! state, render or act once, store the state again.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "wr",
    about = "Wissensrunde: round-based knowledge games over your own data",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Game mode requests.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeAction {
    /// Enable games (resets all progress if they were disabled)
    On,
    /// Request to disable games (needs confirmation)
    Off,
    /// Confirm a pending deactivation
    Confirm,
    /// Withdraw a pending deactivation
    Cancel,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new game collection with demo datasets
    Init {
        /// Name of the collection directory to create
        name: String,
    },

    /// List all games with their progress
    Games {
        /// Collection directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show the active round of a game
    Show {
        /// Game id
        game: String,

        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Answer the active round of a game
    Answer {
        /// Game id
        game: String,

        /// Option number or text, a comma-separated order, up/down/stable, or a number
        #[arg(required = true, num_args = 1..)]
        answer: Vec<String>,

        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play a game interactively until it is finished
    Play {
        /// Game id
        game: String,

        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Reset one game, or all games if no id is given
    Reset {
        /// Game id
        game: Option<String>,

        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Turn game mode on or off
    Mode {
        /// What to do
        #[arg(value_enum)]
        action: ModeAction,

        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show the total score and finished games
    Summary {
        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Export results to a different format
    Export {
        /// Output format: markdown, text, json
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Collection directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Games { dir } => commands::games::run(&dir),
        Commands::Show { game, dir } => commands::show::run(&dir, &game),
        Commands::Answer { game, answer, dir } => {
            commands::answer::run(&dir, &game, &answer.join(" "))
        }
        Commands::Play { game, dir } => commands::play::run(&dir, &game),
        Commands::Reset { game, dir } => commands::reset::run(&dir, game.as_deref()),
        Commands::Mode { action, dir } => commands::mode::run(&dir, action),
        Commands::Summary { dir } => commands::summary::run(&dir),
        Commands::Export {
            format,
            output,
            dir,
        } => commands::export::run(&dir, &format, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
