//! Screen navigation
//!
//! The application moves between four screens. Each move is a named
//! [`Event`] looked up in a fixed transition table; there is no history and
//! no way back from the game screen except through the result screen.
//!
//! ```text
//! Menu --StartGame--> Game --NoMoreQuestions--> Result --BackToMenu--> Menu
//! Menu --OpenSettings--> Settings --Save--> Menu
//! ```

use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The screens of the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Screen {
    /// Main menu, where a game is started or settings are opened
    #[default]
    Menu,
    /// A game in progress
    Game,
    /// Round count selection
    Settings,
    /// Final score of the finished game
    Result,
}

/// Named transitions between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Event {
    /// Leave the menu to play
    StartGame,
    /// Leave the menu to change settings
    OpenSettings,
    /// Store the settings and return to the menu
    Save,
    /// The game ran out of rounds
    NoMoreQuestions,
    /// Leave the result screen for a new start
    BackToMenu,
}

/// Errors that can occur while navigating
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The event has no edge leaving the current screen
    #[error("no transition from {from:?} on {event:?}")]
    InvalidTransition {
        /// Screen the navigator was on
        from: Screen,
        /// Event that was rejected
        event: Event,
    },
}

type TransitionTable = EnumMap<Screen, EnumMap<Event, Option<Screen>>>;

fn transition_table() -> TransitionTable {
    enum_map! {
        Screen::Menu => enum_map! {
            Event::StartGame => Some(Screen::Game),
            Event::OpenSettings => Some(Screen::Settings),
            _ => None,
        },
        Screen::Game => enum_map! {
            Event::NoMoreQuestions => Some(Screen::Result),
            _ => None,
        },
        Screen::Settings => enum_map! {
            Event::Save => Some(Screen::Menu),
            _ => None,
        },
        Screen::Result => enum_map! {
            Event::BackToMenu => Some(Screen::Menu),
            _ => None,
        },
    }
}

/// Memoryless state machine over [`Screen`]
#[derive(Debug, Clone)]
pub struct Navigator {
    screen: Screen,
    transitions: TransitionTable,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            transitions: transition_table(),
        }
    }
}

impl Navigator {
    /// The screen currently shown
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The screen `event` would lead to, if it is allowed right now
    pub fn target(&self, event: Event) -> Option<Screen> {
        self.transitions[self.screen][event]
    }

    /// Follows the edge named by `event`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] and stays put if `event` has no
    /// edge leaving the current screen.
    pub fn apply(&mut self, event: Event) -> Result<Screen, Error> {
        let from = self.screen;
        let to = self
            .target(event)
            .ok_or(Error::InvalidTransition { from, event })?;

        tracing::debug!(?from, ?event, ?to, "navigated");

        self.screen = to;
        Ok(to)
    }
}
