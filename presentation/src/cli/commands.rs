//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for cine-sleuth
#[derive(Parser, Debug)]
#[command(name = "cine-sleuth")]
#[command(author, version, about = "Cine-Sleuth - an AI that guesses the movie you're thinking of")]
#[command(long_about = r#"
Cine-Sleuth plays twenty questions about a movie you have in mind.

Each round the AI asks one yes/no style question, then either names a
movie or asks for more clues. Answer with free text; type 'exit' at any
prompt to leave the game.

API keys are read from GEMINI_API_KEY plus optional backups
GEMINI_API_KEY_1 .. GEMINI_API_KEY_5 (a .env file in the working directory
is loaded first). When one key runs out of quota the next one takes over.

Configuration files are loaded from (in priority order):
1. CINE_SLEUTH_* environment variables (e.g. CINE_SLEUTH_GAME__MAX_ROUNDS=10)
2. --config <path>          Explicit config file
3. ./cine-sleuth.toml       Project-level config
4. ~/.config/cine-sleuth/config.toml   Global config

Example:
  cine-sleuth
  cine-sleuth --max-rounds 10 --model gemini-1.5-flash
  cine-sleuth --no-transcript -vv
"#)]
pub struct Cli {
    /// Maximum number of questions per game
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Gemini model to ask
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Do not append finished games to the transcript file
    #[arg(long, conflicts_with = "transcript")]
    pub no_transcript: bool,

    /// Transcript file (default: logs/log.txt)
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write every oracle exchange to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
