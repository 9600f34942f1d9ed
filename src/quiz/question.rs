//! Multiple choice questions
//!
//! A question is an immutable value: a prompt, exactly four answer options
//! and the index of the one correct option. Answers given by the player are
//! modelled by [`Answer`], which also covers running out of time.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants::quiz::{MAX_OPTION_LENGTH, OPTION_COUNT};

type ValidationResult = garde::Result;

/// Validates that no option is blank or longer than the allowed length
fn validate_options(options: &[String; OPTION_COUNT]) -> ValidationResult {
    match options
        .iter()
        .position(|option| option.trim().is_empty() || option.len() > MAX_OPTION_LENGTH)
    {
        None => Ok(()),
        Some(index) => Err(garde::Error::new(format!(
            "option {index} must be between 1 and {MAX_OPTION_LENGTH} characters",
        ))),
    }
}

/// A single four-option trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// The prompt shown to the player
    #[garde(length(min = crate::constants::quiz::MIN_TEXT_LENGTH, max = crate::constants::quiz::MAX_TEXT_LENGTH))]
    text: String,
    /// The answer options, in display order
    #[garde(custom(|v, _| validate_options(v)))]
    options: [String; OPTION_COUNT],
    /// Position of the correct option inside `options`
    #[garde(range(max = crate::constants::quiz::MAX_CORRECT_INDEX))]
    correct_index: usize,
}

/// What the player did in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// The player picked the option at this index
    Selected(usize),
    /// The countdown ran out before the player picked anything
    TimedOut,
}

impl Question {
    /// Creates a new question
    ///
    /// The question is not validated here; banks validate their questions
    /// when they are built.
    pub fn new<S: Into<String>>(
        text: impl Into<String>,
        options: [S; OPTION_COUNT],
        correct_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.map(Into::into),
            correct_index,
        }
    }

    /// The prompt shown to the player
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The four answer options, in display order
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    /// Index of the correct option
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Whether `answer` picks the correct option
    ///
    /// A timed out answer is never correct.
    pub fn is_correct(&self, answer: Answer) -> bool {
        matches!(answer, Answer::Selected(index) if index == self.correct_index)
    }
}
