//! Core vocabulary quiz library.
//!
//! Provides:
//! - Bilingual dictionary model (Word, Language, Dictionary)
//! - Validation of two-column translation tables and CSV loading
//! - Answer matching for typed translations
//! - The quiz session state machine (prompt selection, checking, reveal)
//! - Shared types (Row, QuizSettings, Event)

pub mod dictionary;
pub mod error;
pub mod loader;
pub mod matching;
pub mod parser;
pub mod session;
pub mod types;

pub use dictionary::{Dictionary, Language, Side, Word, WordId};
pub use error::{LoadError, Result, SessionError, ValidationError};
pub use loader::{load_file, load_reader};
pub use matching::{compare_answers, levenshtein_distance, normalized_similarity, MatchResult};
pub use parser::parse;
pub use session::{CheckResult, Fired, Pending, PendingAction, Phase, QuizSession, Reveal, Verdict};
pub use types::{Event, MatchingMode, QuizSettings, Row};
