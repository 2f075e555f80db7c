//! Rendering quiz events for the terminal.

use vocab_core::Event;

/// How events are written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per event.
    Text,
    /// One JSON object per line.
    Json,
}

/// Format an event as a single line, without the trailing newline.
pub fn render(event: &Event, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(event),
        OutputFormat::Text => Ok(text(event)),
    }
}

fn text(event: &Event) -> String {
    match event {
        Event::Loaded {
            rows,
            words_a,
            words_b,
        } => format!("Loaded {} rows ({} / {} words).", rows, words_a, words_b),
        Event::LoadFailed { message } => format!("Could not load dictionary: {}", message),
        Event::Prompt { text } => format!("Translate: {}", text),
        Event::Correct => "Correct!".to_string(),
        Event::Incorrect => "Wrong!".to_string(),
        Event::Revealed { answer } => format!("Correct is '{}'", answer),
        Event::FeedbackCleared => "...".to_string(),
        Event::Lookup {
            word,
            as_source,
            as_target,
        } => {
            let mut parts = Vec::new();
            if !as_source.is_empty() {
                parts.push(format!("-> {}", quoted(as_source)));
            }
            if !as_target.is_empty() {
                parts.push(format!("<- {}", quoted(as_target)));
            }
            if parts.is_empty() {
                format!("{}: no translations", word)
            } else {
                format!("{}: {}", word, parts.join("; "))
            }
        }
        Event::Error { message } => format!("Error: {}", message),
    }
}

fn quoted(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("'{}'", w))
        .collect::<Vec<_>>()
        .join(", ")
}

pub const HELP: &str = "\
Type a translation and press return to check it.
  :check <answer>   check an answer
  :giveup           show the answer
  :open <path>      load a dictionary file
  :lookup <word>    list translations of a word
  :help             show this help
  :quit             exit";
