//! Terminal front end for the vocabulary quiz.

pub mod config;
pub mod logging;
pub mod render;
pub mod shell;

use clap::Parser;
use tokio::io::BufReader;
use vocab_core::QuizSession;

use crate::config::{Args, Config};

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load(Args::parse());
    logging::init(config.log_file.as_deref())?;

    tracing::info!(settings = ?config.settings, "starting quiz");

    let session = match config.seed {
        Some(seed) => QuizSession::seeded(config.settings.clone(), seed),
        None => QuizSession::new(config.settings.clone()),
    };

    shell::run(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        session,
        config.format,
        config.file,
    )
    .await
}
