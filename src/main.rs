//! Riftbound advisor - command line front end
//!
//! Reads a card catalog and a game snapshot as JSON and prints advice as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use riftbound_advisor::{
    logger::{OutputFormat, VerbosityLevel},
    loader::{CardDatabase, GameSnapshot},
    Advisor, AdvisorConfig, AdvisorLogger,
};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Verbosity level for advisor output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormat> for OutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => OutputFormat::Text,
            LogFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "rift")]
#[command(about = "Riftbound advisor - mulligan and play advice", long_about = None)]
struct Cli {
    /// Advisor tunables (JSON); missing fields use defaults
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Verbosity level for log output on stderr (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', global = true, default_value = "minimal")]
    verbosity: VerbosityArg,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed abilities of a rules text
    Parse {
        /// Rules text (read from stdin when omitted)
        text: Vec<String>,
    },

    /// Keep/mulligan decisions for the opening hand
    Mulligan {
        /// Card catalog (JSON array of card records)
        #[arg(long, value_name = "CATALOG_FILE")]
        catalog: PathBuf,

        /// Game snapshot (JSON)
        #[arg(long, value_name = "SNAPSHOT_FILE")]
        snapshot: PathBuf,
    },

    /// Ranked plays and play sequences for this turn
    Play {
        /// Card catalog (JSON array of card records)
        #[arg(long, value_name = "CATALOG_FILE")]
        catalog: PathBuf,

        /// Game snapshot (JSON)
        #[arg(long, value_name = "SNAPSHOT_FILE")]
        snapshot: PathBuf,

        /// Print one paragraph of plain-text advice instead of JSON
        #[arg(long)]
        simple: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AdvisorConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AdvisorConfig::default(),
    };

    let mut logger = AdvisorLogger::with_verbosity(cli.verbosity.into());
    logger.set_output_format(cli.log_format.into());
    let advisor = Advisor::with_observer(config, logger)?;

    match cli.command {
        Commands::Parse { text } => {
            let text = if text.is_empty() {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading rules text from stdin")?;
                buf
            } else {
                text.join(" ")
            };
            let abilities = advisor.parser().parse(&text);
            println!("{}", serde_json::to_string_pretty(&abilities)?);
        }
        Commands::Mulligan { catalog, snapshot } => {
            let game = load_game(&advisor, &catalog, &snapshot)?;
            let advice = advisor.mulligan_resolved(&game)?;
            println!("{}", serde_json::to_string_pretty(&advice)?);
        }
        Commands::Play {
            catalog,
            snapshot,
            simple,
        } => {
            let game = load_game(&advisor, &catalog, &snapshot)?;
            if simple {
                println!("{}", advisor.simple_advice(&game.state));
            } else {
                let advice = advisor.play_resolved(&game)?;
                println!("{}", serde_json::to_string_pretty(&advice)?);
            }
        }
    }

    Ok(())
}

fn load_game(
    advisor: &Advisor<AdvisorLogger>,
    catalog: &Path,
    snapshot: &Path,
) -> anyhow::Result<riftbound_advisor::loader::ResolvedGame> {
    let db = CardDatabase::load_from_file(catalog)
        .with_context(|| format!("loading catalog {}", catalog.display()))?;
    let snapshot = GameSnapshot::from_file(snapshot)
        .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
    Ok(snapshot.resolve(&db, advisor.parser())?)
}
