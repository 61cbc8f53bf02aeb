use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use scopa_cli::config::GameConfig;
use scopa_cli::console::Prompt;
use scopa_cli::logging::init_logging;
use scopa_cli::session::run_session;
use scopa_core::AppInfo;
use scopa_core::collaborators::{FirstCardChooser, collect_names};

/// Plays Scopa at the terminal.
#[derive(Debug, Parser)]
#[command(name = "scopa", author, version, about = "Scopa card game for the terminal")]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seat a player by name (repeat for each player; skips the name prompts).
    #[arg(short, long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// Override the RNG seed for shuffling and turn order.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the score needed to win.
    #[arg(long, value_name = "POINTS")]
    winning_score: Option<u32>,

    /// Play every turn automatically with the first card in hand.
    #[arg(long)]
    scripted: bool,

    /// Write a JSONL report of every turn and round.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if !cli.players.is_empty() {
        config.players = cli.players;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(winning_score) = cli.winning_score {
        config.rules.winning_score = winning_score;
    }

    if let Some(report) = cli.report {
        config.outputs.report = Some(report);
    }

    config.validate()?;

    if cli.validate_only {
        println!(
            "Configuration valid: {} seat{}, first to {} points.",
            config.seats,
            if config.seats == 1 { "" } else { "s" },
            config.rules.winning_score
        );
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;
    println!("Welcome to {} {}!", AppInfo::name(), AppInfo::version());

    let summary = if cli.scripted {
        let names = config.scripted_names();
        run_session(&config, &names, FirstCardChooser, io::stdout())
    } else {
        let mut prompt = Prompt::stdio();
        let names = if config.players.is_empty() {
            collect_names(&mut prompt, config.seats).context("collecting player names")?
        } else {
            config.players.clone()
        };
        run_session(&config, &names, prompt, io::stdout())
    }
    .context("playing the game")?;

    println!(
        "Game over after {} round{} (seed {}).",
        summary.rounds,
        if summary.rounds == 1 { "" } else { "s" },
        summary.seed
    );
    if let Some(path) = summary.report_path.as_ref() {
        println!(
            "Report: {} rows at {}",
            summary.report_rows,
            path.display()
        );
    }

    Ok(())
}
