//! CLI entrypoint for Cine-Sleuth
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use sleuth_application::{
    ConversationLogger, GameConfig, GameProgressNotifier, NoConversationLogger, NoTranscript,
    PlayGameUseCase, SleuthError, TranscriptSink, shared_rotator,
};
use sleuth_domain::CredentialRotator;
use sleuth_infrastructure::{
    ConfigLoader, EnvCredentialSource, FileConfig, GeminiGateway, GeminiSettings,
    JsonlConversationLogger, TextTranscriptSink, load_dotenv,
};
use sleuth_presentation::{
    Cli, ConsoleFormatter, ConsolePlayer, GameDriver, GameProgressReporter, SimpleGameProgress,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);

    // Held until exit so the file writer flushes.
    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());
    info!("Starting Cine-Sleuth");

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
    if !errors.is_empty() {
        for issue in &errors {
            eprintln!("config error: {}", issue.message);
        }
        bail!("{} configuration error(s)", errors.len());
    }

    // === Credentials ===
    if config.credentials.load_dotenv {
        load_dotenv();
    }
    let source = EnvCredentialSource::new(
        config.credentials.primary_env.clone(),
        config.credentials.backup_env_prefix.clone(),
        config.credentials.max_backups,
    );
    let mut rotator = CredentialRotator::new();
    if let Err(e) = rotator.load(&source) {
        eprintln!("{}", ConsoleFormatter::error(&SleuthError::from(e)));
        return Ok(ExitCode::FAILURE);
    }
    let names: Vec<&str> = rotator.names().collect();
    println!("{}", ConsoleFormatter::credentials_loaded(&names));
    let rotator = shared_rotator(rotator);

    // === Dependency Injection ===
    let gateway = Arc::new(
        GeminiGateway::new(GeminiSettings {
            base_url: config.oracle.base_url.clone(),
            model: config.oracle.model.clone(),
            timeout: Duration::from_secs(config.oracle.timeout_secs),
        })
        .context("Failed to create Gemini client")?,
    );

    let console = Arc::new(ConsolePlayer::stdin());

    let transcript: Arc<dyn TranscriptSink> = if config.transcript.enabled {
        Arc::new(TextTranscriptSink::new(&config.transcript.path))
    } else {
        Arc::new(NoTranscript)
    };

    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .logging
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::new)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let use_case = PlayGameUseCase::new(gateway, rotator.clone(), console.clone())
        .with_config(GameConfig::default().with_max_rounds(config.game.max_rounds))
        .with_transcript(transcript)
        .with_conversation_logger(conversation_logger);

    let progress: Box<dyn GameProgressNotifier> = if cli.quiet {
        Box::new(SimpleGameProgress)
    } else {
        Box::new(GameProgressReporter::new())
    };

    let driver = GameDriver::new(use_case, console, rotator)
        .with_progress(progress)
        .with_reset_between_games(config.credentials.reset_between_games)
        .with_max_rounds(config.game.max_rounds);

    let summary = driver.run().await?;
    info!(
        "Session finished: {} game(s), AI {} / player {}",
        summary.games_played(),
        summary.ai_wins,
        summary.player_wins
    );

    Ok(if summary.failed > 0 && summary.games_played() == summary.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// CLI flags take precedence over every config source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(max_rounds) = cli.max_rounds {
        config.game.max_rounds = max_rounds;
    }
    if let Some(model) = &cli.model {
        config.oracle.model = model.clone();
    }
    if cli.no_transcript {
        config.transcript.enabled = false;
    }
    if let Some(path) = &cli.transcript {
        config.transcript.enabled = true;
        config.transcript.path = path.display().to_string();
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.display().to_string());
    }
}

/// Stderr logging by verbosity, plus a daily rolling file when `log_dir` is set.
fn init_logging(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "cine-sleuth.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
