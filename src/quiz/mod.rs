//! Quiz content and settings
//!
//! This module contains the static data the engine plays with: the
//! questions, the ordered bank they are drawn from, and the user-editable
//! configuration that bounds how many of them are played.

use thiserror::Error;

pub mod bank;
pub mod config;
pub mod question;

/// Errors raised while building quiz content or settings
#[derive(Error, Debug)]
pub enum Error {
    /// The data parsed but broke one of the quiz limits
    #[error("invalid quiz data: {0}")]
    Invalid(#[from] garde::Report),
    /// The data could not be parsed at all
    #[error("malformed quiz data: {0}")]
    Malformed(#[from] serde_json::Error),
}
