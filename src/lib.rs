//! # Trivia
//!
//! This library provides the core logic of a single-player, timed
//! multiple-choice trivia quiz. It handles the question bank, scoring and
//! round progression, the per-round answer countdown, and navigation between
//! the menu, settings, game and result screens.
//!
//! Rendering is left to the caller: a [`game::Game`] reports every change
//! through a [`session::Tunnel`], and timed events are delivered back to it as
//! [`AlarmMessage`]s by whatever scheduler the caller runs.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::ignored_unit_patterns)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]

pub mod constants;

pub mod engine;
pub mod game;
pub mod navigation;
pub mod quiz;
pub mod session;
pub mod timer;

pub use timer::AlarmMessage;
