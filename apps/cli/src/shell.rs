//! Interactive quiz loop.
//!
//! Runs on a single task: input lines and expired delays are handled one at
//! a time. Delays are spawned sleeps that post their [`Pending`] back into the
//! loop, where the session decides whether it still applies.

use std::path::{Path, PathBuf};

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use vocab_core::{
    load_file, Event, Fired, Pending, QuizSession, SessionError, Side, Verdict,
};

use crate::render::{render, OutputFormat, HELP};

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: the typed translation, submitted with return.
    Answer(String),
    Check(String),
    GiveUp,
    Open(PathBuf),
    Lookup(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Lines starting with ':' are commands, anything else is an answer.
    /// Answers and lookup words are kept exactly as typed.
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Self::Answer(line.to_string());
        };

        let (name, arg) = match rest.split_once(' ') {
            Some((name, arg)) => (name, arg),
            None => (rest, ""),
        };

        match name {
            "check" | "c" => Self::Check(arg.to_string()),
            "giveup" | "g" => Self::GiveUp,
            "open" | "o" if !arg.trim().is_empty() => Self::Open(PathBuf::from(arg.trim())),
            "lookup" | "l" if !arg.is_empty() => Self::Lookup(arg.to_string()),
            "help" | "h" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Shell<R, W> {
    session: QuizSession<R>,
    output: W,
    format: OutputFormat,
    timers: mpsc::UnboundedSender<Pending>,
}

/// Run the quiz until `:quit` or end of input.
pub async fn run<I, W, R>(
    input: I,
    output: W,
    session: QuizSession<R>,
    format: OutputFormat,
    file: Option<PathBuf>,
) -> anyhow::Result<()>
where
    I: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    R: Rng,
{
    let (timers, mut expired) = mpsc::unbounded_channel();
    let mut shell = Shell {
        session,
        output,
        format,
        timers,
    };

    match file {
        Some(path) => shell.open(&path).await?,
        None => shell.note("Open dictionary file first! (:open <path>, :help)").await?,
    }

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("end of input");
                    break;
                };
                if shell.handle(Command::parse(&line)).await? == Flow::Quit {
                    break;
                }
            }
            Some(pending) = expired.recv() => shell.fire(pending).await?,
        }
    }

    Ok(())
}

impl<R: Rng, W: AsyncWrite + Unpin> Shell<R, W> {
    async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::Answer(text) | Command::Check(text) => self.check(&text).await?,
            Command::GiveUp => self.give_up().await?,
            Command::Open(path) => self.open(&path).await?,
            Command::Lookup(word) => self.lookup(word).await?,
            Command::Help => self.note(HELP).await?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(line) => {
                self.emit(Event::Error {
                    message: format!("unknown command '{}'", line),
                })
                .await?
            }
        }
        Ok(Flow::Continue)
    }

    async fn open(&mut self, path: &Path) -> anyhow::Result<()> {
        let loaded = load_file(path)
            .map_err(|e| e.to_string())
            .and_then(|dictionary| {
                let rows = dictionary.len();
                let words_a = dictionary.language_a().len();
                let words_b = dictionary.language_b().len();
                self.session
                    .load(dictionary)
                    .map(|prompt| (Event::Loaded { rows, words_a, words_b }, prompt))
                    .map_err(|e| e.to_string())
            });

        match loaded {
            Ok((event, prompt)) => {
                self.emit(event).await?;
                self.emit(Event::Prompt { text: prompt }).await
            }
            Err(message) => {
                tracing::warn!(path = %path.display(), "load rejected: {}", message);
                self.emit(Event::LoadFailed { message }).await
            }
        }
    }

    async fn check(&mut self, typed: &str) -> anyhow::Result<()> {
        match self.session.check_answer(typed) {
            Ok(result) => {
                self.schedule(result.pending);
                let event = match result.verdict {
                    Verdict::Correct => Event::Correct,
                    Verdict::Incorrect => Event::Incorrect,
                };
                self.emit(event).await
            }
            Err(e) => self.inactive(e).await,
        }
    }

    async fn give_up(&mut self) -> anyhow::Result<()> {
        match self.session.give_up() {
            Ok(reveal) => {
                self.schedule(reveal.pending);
                self.emit(Event::Revealed {
                    answer: reveal.answer,
                })
                .await
            }
            Err(e) => self.inactive(e).await,
        }
    }

    async fn lookup(&mut self, word: String) -> anyhow::Result<()> {
        let Some(dictionary) = self.session.dictionary() else {
            return self.inactive(SessionError::Inactive).await;
        };

        let translations = |side: Side| -> Vec<String> {
            dictionary
                .translations_of(side, &word)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        let as_source = translations(Side::A);
        let as_target = translations(Side::B);

        self.emit(Event::Lookup {
            word,
            as_source,
            as_target,
        })
        .await
    }

    async fn fire(&mut self, pending: Pending) -> anyhow::Result<()> {
        match self.session.fire(pending) {
            Some(Fired::Prompt(text)) => self.emit(Event::Prompt { text }).await,
            Some(Fired::FeedbackCleared) => self.emit(Event::FeedbackCleared).await,
            None => Ok(()),
        }
    }

    fn schedule(&self, pending: Pending) {
        let timers = self.timers.clone();
        tokio::spawn(async move {
            tokio::time::sleep(pending.delay).await;
            // The loop may already be gone.
            let _ = timers.send(pending);
        });
    }

    async fn inactive(&mut self, error: SessionError) -> anyhow::Result<()> {
        self.emit(Event::Error {
            message: format!("{}. Open dictionary file first!", error),
        })
        .await
    }

    async fn emit(&mut self, event: Event) -> anyhow::Result<()> {
        let line = render(&event, self.format)?;
        self.write_line(&line).await
    }

    /// Free text for people; skipped in JSON mode.
    async fn note(&mut self, text: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => self.write_line(text).await,
            OutputFormat::Json => Ok(()),
        }
    }

    async fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}
