//! Core types for the vocabulary quiz.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One source/target pair from a translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub source: String,
    pub target: String,
    /// 1-based row number; blank lines are not counted.
    pub line_number: usize,
}

impl Row {
    pub fn new(source: impl Into<String>, target: impl Into<String>, line_number: usize) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            line_number,
        }
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Exact
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "case_insensitive" => Some(Self::CaseInsensitive),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// Quiz behaviour settings.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
    /// Delay before moving on after a correct answer.
    pub correct_delay_ms: u64,
    /// Delay before clearing the feedback after a wrong answer.
    pub incorrect_delay_ms: u64,
    /// Delay before moving on after revealing the answer.
    pub reveal_delay_ms: u64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::default(),
            fuzzy_threshold: 0.8,
            correct_delay_ms: 1000,
            incorrect_delay_ms: 1000,
            reveal_delay_ms: 3000,
        }
    }
}

impl QuizSettings {
    pub fn correct_delay(&self) -> Duration {
        Duration::from_millis(self.correct_delay_ms)
    }

    pub fn incorrect_delay(&self) -> Duration {
        Duration::from_millis(self.incorrect_delay_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Everything the quiz reports to a presentation shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Loaded {
        rows: usize,
        words_a: usize,
        words_b: usize,
    },
    LoadFailed {
        message: String,
    },
    Prompt {
        text: String,
    },
    Correct,
    Incorrect,
    Revealed {
        answer: String,
    },
    FeedbackCleared,
    /// Translations of a word, kept apart by the language it was found in.
    Lookup {
        word: String,
        /// The word found in language A; its language B translations.
        as_source: Vec<String>,
        /// The word found in language B; its language A translations.
        as_target: Vec<String>,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_mode_round_trips_names() {
        for mode in [MatchingMode::Exact, MatchingMode::CaseInsensitive, MatchingMode::Fuzzy] {
            assert_eq!(MatchingMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(MatchingMode::from_str("loose"), None);
    }

    #[test]
    fn default_settings_match_quiz_timing() {
        let settings = QuizSettings::default();
        assert_eq!(settings.matching_mode, MatchingMode::Exact);
        assert_eq!(settings.correct_delay(), Duration::from_secs(1));
        assert_eq!(settings.incorrect_delay(), Duration::from_secs(1));
        assert_eq!(settings.reveal_delay(), Duration::from_secs(3));
    }

    #[test]
    fn event_serializes_with_tag() {
        let json = serde_json::to_value(Event::Prompt { text: "dog".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "prompt", "text": "dog" }));

        let json = serde_json::to_value(Event::FeedbackCleared).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "feedback_cleared" }));
    }

    #[test]
    fn lookup_event_keeps_sides_apart() {
        let event = Event::Lookup {
            word: " a ".into(),
            as_source: vec!["chat".into()],
            as_target: vec![],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "lookup",
                "word": " a ",
                "as_source": ["chat"],
                "as_target": [],
            })
        );
        assert_eq!(serde_json::from_value::<Event>(json).unwrap(), event);
    }
}
