//! Configuration constants for the trivia engine
//!
//! This module contains the limits and defaults used throughout the engine
//! to keep questions, settings and the countdown within consistent bounds.

/// Question bank constants
pub mod quiz {
    /// Number of answer options every question carries
    pub const OPTION_COUNT: usize = 4;
    /// Highest valid value for a question's correct option index
    pub const MAX_CORRECT_INDEX: usize = OPTION_COUNT - 1;
    /// Minimum length of a question text in characters
    pub const MIN_TEXT_LENGTH: usize = 1;
    /// Maximum length of a question text in characters
    pub const MAX_TEXT_LENGTH: usize = 200;
    /// Maximum length of a single answer option in characters
    pub const MAX_OPTION_LENGTH: usize = 100;
}

/// Round count constants, as offered by the settings screen
pub mod rounds {
    /// Fewest rounds a game can be configured with
    pub const MIN_ROUNDS: usize = 1;
    /// Most rounds a game can be configured with
    pub const MAX_ROUNDS: usize = 20;
    /// Rounds played when nothing else was chosen
    pub const DEFAULT_ROUNDS: usize = 10;
}

/// Countdown constants
pub mod timer {
    /// Default number of seconds to answer a question
    pub const DEFAULT_TIME_LIMIT: u64 = 10;
    /// Minimum configurable answer time in seconds
    pub const MIN_TIME_LIMIT: u64 = 5;
    /// Maximum configurable answer time in seconds
    pub const MAX_TIME_LIMIT: u64 = 60;
    /// Seconds between two countdown ticks
    pub const TICK_SECONDS: u64 = 1;
}
