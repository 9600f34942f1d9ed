//! Quiz session coordination
//!
//! This module ties the engine, the configuration, the round timer and the
//! navigator together into a single [`Game`]. The presentation layer drives
//! it with [`IncomingMessage`]s, the scheduler with timer alarms, and it
//! reports back through a [`Tunnel`].

use std::{fmt::Debug, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    AlarmMessage,
    constants::{
        quiz::OPTION_COUNT,
        rounds::{MAX_ROUNDS, MIN_ROUNDS},
    },
    engine::{GameEngine, GameState},
    navigation::{Event, Navigator, Screen},
    quiz::{
        bank::QuestionBank,
        config::Configuration,
        question::{Answer, Question},
    },
    session::Tunnel,
    timer::{RoundTimer, TickOutcome},
};

/// Messages received from the presentation layer
///
/// Each group can only be sent from its own screen; anything else is
/// dropped.
#[derive(Debug, Deserialize, Clone, derive_more::From)]
pub enum IncomingMessage {
    /// Messages from the main menu
    Menu(IncomingMenuMessage),
    /// Messages from the settings screen
    Settings(IncomingSettingsMessage),
    /// Messages from the game screen
    Game(IncomingGameMessage),
    /// Messages from the result screen
    Result(IncomingResultMessage),
}

impl IncomingMessage {
    /// Validates that a message belongs to the screen currently shown
    fn follows(&self, screen: Screen) -> bool {
        matches!(
            (self, screen),
            (IncomingMessage::Menu(_), Screen::Menu)
                | (IncomingMessage::Settings(_), Screen::Settings)
                | (IncomingMessage::Game(_), Screen::Game)
                | (IncomingMessage::Result(_), Screen::Result)
        )
    }
}

/// Messages that can be sent from the main menu
#[derive(Debug, Deserialize, Clone, Copy)]
pub enum IncomingMenuMessage {
    /// Start a new game
    StartGame,
    /// Open the settings screen
    OpenSettings,
}

/// Messages that can be sent from the settings screen
#[derive(Debug, Deserialize, Clone, Copy)]
pub enum IncomingSettingsMessage {
    /// Store the chosen round count and return to the menu
    Save(usize),
}

/// Messages that can be sent from the game screen
#[derive(Debug, Deserialize, Clone, Copy)]
pub enum IncomingGameMessage {
    /// The player picked an option
    Answer {
        /// Round the picked option was shown in
        round: usize,
        /// Index of the picked option
        index: usize,
    },
}

/// Messages that can be sent from the result screen
#[derive(Debug, Deserialize, Clone, Copy)]
pub enum IncomingResultMessage {
    /// Return to the menu, discarding the finished game
    BackToMenu,
}

/// Update messages sent to the presentation layer about state changes
#[serde_with::serde_as]
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum UpdateMessage {
    /// A different screen is now shown
    Screen(Screen),
    /// A new round has started
    QuestionAnnouncement {
        /// Round number, starting at 1
        round: usize,
        /// Number of rounds in this game
        total_rounds: usize,
        /// The question text being asked
        question: String,
        /// The options to pick from
        options: [String; OPTION_COUNT],
        /// Time available to answer
        #[serde_as(as = "serde_with::DurationSeconds<u64>")]
        duration: Duration,
    },
    /// Seconds left to answer the current question
    TimeLeft(u64),
    /// Progress after an answer (or a timeout) was applied
    Score(GameState),
    /// The game is over
    Summary {
        /// Number of correctly answered questions
        score: usize,
        /// Number of rounds that were played
        total_rounds: usize,
    },
}

/// Sync messages describing the whole current screen
#[serde_with::serde_as]
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum SyncMessage {
    /// The main menu
    Menu,
    /// The settings screen
    Settings {
        /// Currently stored round count
        round_count: usize,
        /// Smallest selectable round count
        min_rounds: usize,
        /// Largest selectable round count
        max_rounds: usize,
    },
    /// A game in progress
    Game {
        /// Round number, starting at 1
        round: usize,
        /// Number of rounds in this game
        total_rounds: usize,
        /// Number of correctly answered questions so far
        score: usize,
        /// The question text, absent once the rounds have run out
        question: Option<String>,
        /// The options to pick from, absent once the rounds have run out
        options: Option<[String; OPTION_COUNT]>,
        /// Time left to answer
        #[serde_as(as = "serde_with::DurationSeconds<u64>")]
        remaining: Duration,
    },
    /// The result screen
    Result {
        /// Number of correctly answered questions
        score: usize,
        /// Number of rounds that were played
        total_rounds: usize,
    },
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// A single-player quiz session
///
/// The game is the single owner of all mutable quiz state. It outlives
/// individual plays: finishing a game and going back to the menu resets the
/// score and round but keeps the configuration.
pub struct Game {
    /// Score, round and the question bank
    engine: GameEngine,
    /// User settings, only written by the settings screen
    configuration: Configuration,
    /// Which screen is shown
    navigator: Navigator,
    /// Countdown for the current round
    timer: RoundTimer,
}

impl Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.engine.state())
            .field("screen", &self.navigator.screen())
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    /// A game over the built-in bank with default settings
    fn default() -> Self {
        Self::new(QuestionBank::default(), Configuration::default())
    }
}

// Convenience methods
impl Game {
    /// Creates a new session on the menu screen
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trivia::game::Game;
    /// use trivia::navigation::Screen;
    /// use trivia::quiz::{bank::QuestionBank, config::Configuration};
    ///
    /// let game = Game::new(QuestionBank::default(), Configuration::default());
    /// assert_eq!(game.screen(), Screen::Menu);
    /// ```
    pub fn new(bank: QuestionBank, configuration: Configuration) -> Self {
        Self {
            engine: GameEngine::new(bank),
            timer: RoundTimer::new(configuration.time_limit()),
            configuration,
            navigator: Navigator::default(),
        }
    }

    /// The screen currently shown
    pub fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    /// The current score and round
    pub fn state(&self) -> GameState {
        self.engine.state()
    }

    /// The stored settings
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The question being asked, or `None` once the rounds have run out
    pub fn current_question(&self) -> Option<&Question> {
        self.engine.current_question(&self.configuration)
    }

    /// Whole seconds left on the countdown
    pub fn remaining_seconds(&self) -> u64 {
        self.timer.remaining_seconds()
    }

    /// Number of rounds in a game under the stored settings
    pub fn total_rounds(&self) -> usize {
        self.engine.total_rounds(&self.configuration)
    }

    /// Follows a navigation edge and announces the new screen
    ///
    /// Returns `false` if the edge doesn't exist from the current screen.
    fn navigate<T: Tunnel>(&mut self, event: Event, tunnel: &T) -> bool {
        match self.navigator.apply(event) {
            Ok(screen) => {
                tunnel.send_message(&UpdateMessage::Screen(screen));
                true
            }
            Err(error) => {
                tracing::warn!(%error, "navigation rejected");
                false
            }
        }
    }
}

impl Game {
    /// Announces the current question and starts its countdown
    ///
    /// If the rounds have run out instead, the game moves to the result
    /// screen and the final score is announced.
    fn play_round<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        schedule_message: S,
        tunnel: &T,
    ) {
        let round = self.engine.state().round;

        if let Some(question) = self.engine.current_question(&self.configuration) {
            tunnel.send_message(&UpdateMessage::QuestionAnnouncement {
                round,
                total_rounds: self.engine.total_rounds(&self.configuration),
                question: question.text().to_owned(),
                options: question.options().clone(),
                duration: self.timer.time_limit(),
            });

            self.timer.start(round, schedule_message);
        } else {
            self.timer.stop();

            if self.navigate(Event::NoMoreQuestions, tunnel) {
                let GameState { score, .. } = self.engine.state();

                tracing::info!(score, rounds = round - 1, "game finished");

                tunnel.send_message(&UpdateMessage::Summary {
                    score,
                    total_rounds: self.engine.total_rounds(&self.configuration),
                });
            }
        }
    }

    /// Applies the answer that won the round and moves on
    fn resolve_round<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        answer: Answer,
        schedule_message: S,
        tunnel: &T,
    ) {
        if let Some(state) = self.engine.submit_answer(&self.configuration, answer) {
            tunnel.send_message(&UpdateMessage::Score(state));
        }

        self.play_round(schedule_message, tunnel);
    }

    /// Handles messages from the presentation layer
    ///
    /// Messages that don't belong to the current screen, and answers for a
    /// round that has already been resolved, are ignored.
    ///
    /// # Arguments
    ///
    /// * `message` - The incoming message to process
    /// * `schedule_message` - Function to schedule delayed alarms for the countdown
    /// * `tunnel` - Where updates for the presentation layer are sent
    pub fn receive_message<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: IncomingMessage,
        schedule_message: S,
        tunnel: &T,
    ) {
        let screen = self.navigator.screen();

        if !message.follows(screen) {
            tracing::debug!(?message, ?screen, "message ignored on this screen");
            return;
        }

        match message {
            IncomingMessage::Menu(IncomingMenuMessage::StartGame) => {
                if self.navigate(Event::StartGame, tunnel) {
                    self.play_round(schedule_message, tunnel);
                }
            }
            IncomingMessage::Menu(IncomingMenuMessage::OpenSettings) => {
                if self.navigate(Event::OpenSettings, tunnel) {
                    tunnel.send_state(&self.state_message());
                }
            }
            IncomingMessage::Settings(IncomingSettingsMessage::Save(round_count)) => {
                if self.navigator.target(Event::Save).is_some() {
                    let stored = self.configuration.set_round_count(round_count);
                    tracing::info!(round_count = stored, "settings saved");
                    self.navigate(Event::Save, tunnel);
                }
            }
            IncomingMessage::Game(IncomingGameMessage::Answer { round, index }) => {
                if round != self.engine.state().round {
                    tracing::debug!(round, "answer for a past round ignored");
                } else if self.timer.cancel() {
                    self.resolve_round(Answer::Selected(index), schedule_message, tunnel);
                } else {
                    tracing::debug!(round, "round already resolved");
                }
            }
            IncomingMessage::Result(IncomingResultMessage::BackToMenu) => {
                if self.navigate(Event::BackToMenu, tunnel) {
                    self.engine.reset_game();
                }
            }
        }
    }

    /// Handles scheduled alarms for the countdown
    ///
    /// Alarms left over from an earlier round or an abandoned game are
    /// ignored. When the countdown runs out before an answer, the round is
    /// resolved as [`Answer::TimedOut`].
    ///
    /// # Arguments
    ///
    /// * `message` - The alarm message to process
    /// * `schedule_message` - Function to schedule delayed alarms for the countdown
    /// * `tunnel` - Where updates for the presentation layer are sent
    pub fn receive_alarm<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        if self.navigator.screen() != Screen::Game {
            return;
        }

        match self.timer.receive_alarm(&message, &mut schedule_message) {
            TickOutcome::Counting(remaining) => {
                tunnel.send_message(&UpdateMessage::TimeLeft(remaining));
            }
            TickOutcome::Expired => {
                tunnel.send_message(&UpdateMessage::TimeLeft(0));
                self.resolve_round(Answer::TimedOut, schedule_message, tunnel);
            }
            TickOutcome::Stale => (),
        }
    }

    /// Returns the message necessary to rebuild the current screen
    pub fn state_message(&self) -> SyncMessage {
        let GameState { score, round } = self.engine.state();

        match self.navigator.screen() {
            Screen::Menu => SyncMessage::Menu,
            Screen::Settings => SyncMessage::Settings {
                round_count: self.configuration.round_count(),
                min_rounds: MIN_ROUNDS,
                max_rounds: MAX_ROUNDS,
            },
            Screen::Game => {
                let question = self.current_question();

                SyncMessage::Game {
                    round,
                    total_rounds: self.total_rounds(),
                    score,
                    question: question.map(|q| q.text().to_owned()),
                    options: question.map(|q| q.options().clone()),
                    remaining: Duration::from_secs(self.timer.remaining_seconds()),
                }
            }
            Screen::Result => SyncMessage::Result {
                score,
                total_rounds: self.total_rounds(),
            },
        }
    }

    /// Sends the full state of the current screen through `tunnel`
    ///
    /// Used when the presentation layer is (re)attached.
    pub fn update_session<T: Tunnel>(&self, tunnel: &T) {
        tunnel.send_state(&self.state_message());
    }
}
