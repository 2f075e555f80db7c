//! Runtime configuration.
//!
//! Settings come from the environment (a `.env` file is read first), then
//! command line flags override them. Missing or unparsable variables fall
//! back to the defaults.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use vocab_core::{MatchingMode, QuizSettings};

use crate::render::OutputFormat;

/// Practice translations from a two-column CSV file.
#[derive(Debug, Parser)]
#[command(name = "vocab-quiz", version)]
pub struct Args {
    /// Dictionary file to open on start.
    pub file: Option<PathBuf>,

    /// Print events as JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Seed for a reproducible prompt order.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Answer matching: exact, case_insensitive or fuzzy.
    #[arg(long, value_parser = parse_matching_mode)]
    pub matching: Option<MatchingMode>,
}

fn parse_matching_mode(s: &str) -> Result<MatchingMode, String> {
    MatchingMode::from_str(s).ok_or_else(|| format!("unknown matching mode '{}'", s))
}

#[derive(Debug)]
pub struct Config {
    pub settings: QuizSettings,
    pub file: Option<PathBuf>,
    pub format: OutputFormat,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn load(args: Args) -> Self {
        dotenvy::dotenv().ok();
        Self::from_parts(args, |key| env::var(key).ok())
    }

    fn from_parts(args: Args, var: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = settings_from(&var);
        if let Some(mode) = args.matching {
            settings.matching_mode = mode;
        }

        let format = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            settings,
            file: args.file,
            format,
            seed: args.seed,
            log_file: args.log_file.or_else(|| var("QUIZ_LOG_FILE").map(PathBuf::from)),
        }
    }
}

/// Quiz settings from `QUIZ_*` variables.
pub fn settings_from(var: impl Fn(&str) -> Option<String>) -> QuizSettings {
    let defaults = QuizSettings::default();

    QuizSettings {
        matching_mode: var("QUIZ_MATCHING_MODE")
            .and_then(|v| MatchingMode::from_str(&v))
            .unwrap_or(defaults.matching_mode),
        fuzzy_threshold: var("QUIZ_FUZZY_THRESHOLD")
            .and_then(|v| v.parse().ok())
            .filter(|t: &f64| (0.0..=1.0).contains(t))
            .unwrap_or(defaults.fuzzy_threshold),
        correct_delay_ms: var("QUIZ_CORRECT_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.correct_delay_ms),
        incorrect_delay_ms: var("QUIZ_INCORRECT_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.incorrect_delay_ms),
        reveal_delay_ms: var("QUIZ_REVEAL_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.reveal_delay_ms),
    }
}
