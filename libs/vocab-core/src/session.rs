//! Quiz session state machine.
//!
//! ```text
//! Empty --load--> AwaitingAnswer --check--> Correct   --(delay)--> AwaitingAnswer (new prompt)
//!                                 --check--> Incorrect --(delay)--> AwaitingAnswer (same prompt)
//!                                 --give up-> Revealed --(delay)--> AwaitingAnswer (new prompt)
//! ```
//!
//! Delays are not run here. Operations that need one return a [`Pending`]
//! which the caller hands back to [`QuizSession::fire`] when it expires.
//! Every load, check, give-up, advance and clear bumps a generation counter,
//! and a pending transition from an older generation is dropped.

use crate::dictionary::Dictionary;
use crate::error::SessionError;
use crate::matching::compare_answers;
use crate::types::{QuizSettings, Row};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Where the session is in the prompt/answer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    AwaitingAnswer,
    Correct,
    Incorrect,
    Revealed,
}

/// Result of checking a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Transition to apply once a delay has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Move on to a new prompt.
    Advance,
    /// Clear the feedback and keep the current prompt.
    ClearFeedback,
}

/// A delayed transition owned by the caller's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    generation: u64,
    pub action: PendingAction,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub verdict: Verdict,
    pub similarity: f64,
    pub pending: Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub answer: String,
    pub pending: Pending,
}

/// What a fired pending transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired {
    Prompt(String),
    FeedbackCleared,
}

/// The active dictionary, the current prompt and the answer loop around them.
pub struct QuizSession<R = StdRng> {
    dictionary: Option<Dictionary>,
    current: Option<usize>,
    phase: Phase,
    generation: u64,
    settings: QuizSettings,
    rng: R,
}

impl QuizSession<StdRng> {
    pub fn new(settings: QuizSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Session with a reproducible prompt order.
    pub fn seeded(settings: QuizSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(settings: QuizSettings, rng: R) -> Self {
        Self {
            dictionary: None,
            current: None,
            phase: Phase::Empty,
            generation: 0,
            settings,
            rng,
        }
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.dictionary.is_some()
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_row(&self) -> Option<&Row> {
        let index = self.current?;
        self.dictionary.as_ref()?.row(index)
    }

    /// Source text of the current prompt.
    pub fn prompt(&self) -> Option<&str> {
        self.current_row().map(|row| row.source.as_str())
    }

    /// Replace the active dictionary and select a first prompt.
    ///
    /// An empty dictionary is refused and leaves the session untouched.
    pub fn load(&mut self, dictionary: Dictionary) -> Result<String, SessionError> {
        if dictionary.is_empty() {
            return Err(SessionError::EmptyDictionary);
        }

        self.dictionary = Some(dictionary);
        self.current = None;
        self.next_prompt()
    }

    /// Drop the dictionary and return to the empty state.
    pub fn clear(&mut self) {
        self.dictionary = None;
        self.current = None;
        self.phase = Phase::Empty;
        self.generation += 1;
    }

    /// Pick a random row, never the current one when there is a choice.
    pub fn next_prompt(&mut self) -> Result<String, SessionError> {
        let len = self.dictionary.as_ref().ok_or(SessionError::Inactive)?.len();

        let mut index = self.rng.gen_range(0..len);
        if len > 1 {
            while Some(index) == self.current {
                index = self.rng.gen_range(0..len);
            }
        }

        self.current = Some(index);
        self.phase = Phase::AwaitingAnswer;
        self.generation += 1;

        let prompt = self.prompt().ok_or(SessionError::Inactive)?.to_string();
        tracing::debug!(index, prompt = %prompt, "next prompt");
        Ok(prompt)
    }

    /// Compare `typed` with the current row's target text.
    ///
    /// A correct answer schedules an advance; a wrong one schedules clearing
    /// the feedback and keeps the prompt so the user can retry.
    pub fn check_answer(&mut self, typed: &str) -> Result<CheckResult, SessionError> {
        let row = self.current_row().ok_or(SessionError::Inactive)?;
        let result = compare_answers(
            typed,
            &row.target,
            self.settings.matching_mode,
            self.settings.fuzzy_threshold,
        );

        let (verdict, pending) = if result.is_correct {
            self.phase = Phase::Correct;
            (
                Verdict::Correct,
                self.schedule(PendingAction::Advance, self.settings.correct_delay()),
            )
        } else {
            self.phase = Phase::Incorrect;
            (
                Verdict::Incorrect,
                self.schedule(PendingAction::ClearFeedback, self.settings.incorrect_delay()),
            )
        };

        tracing::debug!(?verdict, similarity = result.similarity, "answer checked");
        Ok(CheckResult {
            verdict,
            similarity: result.similarity,
            pending,
        })
    }

    /// Reveal the current row's target text and schedule an advance.
    pub fn give_up(&mut self) -> Result<Reveal, SessionError> {
        let answer = self
            .current_row()
            .ok_or(SessionError::Inactive)?
            .target
            .clone();

        self.phase = Phase::Revealed;
        let pending = self.schedule(PendingAction::Advance, self.settings.reveal_delay());
        Ok(Reveal { answer, pending })
    }

    /// Apply a pending transition if nothing has superseded it.
    pub fn fire(&mut self, pending: Pending) -> Option<Fired> {
        if pending.generation != self.generation {
            tracing::debug!(?pending, current = self.generation, "dropping stale transition");
            return None;
        }

        match (pending.action, self.phase) {
            (PendingAction::Advance, Phase::Correct | Phase::Revealed) => {
                self.next_prompt().ok().map(Fired::Prompt)
            }
            (PendingAction::ClearFeedback, Phase::Incorrect) => {
                self.phase = Phase::AwaitingAnswer;
                Some(Fired::FeedbackCleared)
            }
            (action, phase) => {
                tracing::debug!(?action, ?phase, "transition does not apply");
                None
            }
        }
    }

    fn schedule(&mut self, action: PendingAction, delay: Duration) -> Pending {
        self.generation += 1;
        Pending {
            generation: self.generation,
            action,
            delay,
        }
    }
}
