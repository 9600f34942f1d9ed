//! Round and score bookkeeping
//!
//! The engine owns the question bank and the current [`GameState`]. It
//! answers "which question is being asked?" and applies answers. Every
//! answer, including a timeout, produces a fresh state snapshot with the
//! round advanced by exactly one; nothing else ever advances the round.

use serde::{Deserialize, Serialize};

use crate::quiz::{
    bank::QuestionBank,
    config::Configuration,
    question::{Answer, Question},
};

/// Immutable snapshot of a game's progress
///
/// `score` never exceeds the number of rounds already completed
/// (`round - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Number of correctly answered questions
    pub score: usize,
    /// The round being played, starting at 1
    pub round: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self { score: 0, round: 1 }
    }
}

impl GameState {
    /// The state that follows this one after an answer
    #[must_use]
    pub fn answered(self, correct: bool) -> Self {
        Self {
            score: self.score + usize::from(correct),
            round: self.round + 1,
        }
    }

    /// Number of rounds that have already been answered
    pub fn completed_rounds(&self) -> usize {
        self.round - 1
    }
}

/// Owns the game progress and applies answers against the question bank
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameEngine {
    bank: QuestionBank,
    state: GameState,
}

impl GameEngine {
    /// Creates an engine at the first round of `bank`
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            state: GameState::default(),
        }
    }

    /// The current progress snapshot
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The bank questions are drawn from
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Number of rounds the game lasts under `configuration`
    ///
    /// This is the smaller of the configured round count and the bank size.
    pub fn total_rounds(&self, configuration: &Configuration) -> usize {
        configuration.round_count().min(self.bank.len())
    }

    /// The question for the current round
    ///
    /// Returns `None` once every round has been played, which marks the end
    /// of the game.
    pub fn current_question(&self, configuration: &Configuration) -> Option<&Question> {
        if self.state.round <= self.total_rounds(configuration) {
            self.bank.question_at(self.state.round)
        } else {
            None
        }
    }

    /// Applies `answer` to the current question and moves to the next round
    ///
    /// Returns the new state, or `None` without changing anything if the
    /// game has already ended.
    pub fn submit_answer(
        &mut self,
        configuration: &Configuration,
        answer: Answer,
    ) -> Option<GameState> {
        let correct = self.current_question(configuration)?.is_correct(answer);

        self.state = self.state.answered(correct);

        tracing::debug!(
            ?answer,
            correct,
            score = self.state.score,
            round = self.state.round,
            "answer applied"
        );

        Some(self.state)
    }

    /// Starts over from the first round with no points
    ///
    /// The configuration is not affected.
    pub fn reset_game(&mut self) {
        self.state = GameState::default();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question::new("Q1", ["a", "b", "c", "d"], 2),
            Question::new("Q2", ["a", "b", "c", "d"], 1),
            Question::new("Q3", ["a", "b", "c", "d"], 0),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::new(create_test_bank());
        assert_eq!(engine.state(), GameState { score: 0, round: 1 });
    }

    #[test]
    fn test_correct_answer_scores() {
        let mut engine = GameEngine::new(create_test_bank());
        let configuration = Configuration::default();

        let state = engine.submit_answer(&configuration, Answer::Selected(2));

        assert_eq!(state, Some(GameState { score: 1, round: 2 }));
    }

    #[test]
    fn test_wrong_answer_only_advances() {
        let mut engine = GameEngine::new(create_test_bank());
        let configuration = Configuration::default();

        let state = engine.submit_answer(&configuration, Answer::Selected(0));

        assert_eq!(state, Some(GameState { score: 0, round: 2 }));
    }

    #[test]
    fn test_timeout_matches_impossible_index() {
        let configuration = Configuration::default();

        let mut timed_out = GameEngine::new(create_test_bank());
        timed_out.submit_answer(&configuration, Answer::TimedOut);

        let mut impossible = GameEngine::new(create_test_bank());
        impossible.submit_answer(&configuration, Answer::Selected(usize::MAX));

        assert_eq!(timed_out.state(), impossible.state());
        assert_eq!(timed_out.state(), GameState { score: 0, round: 2 });
    }

    #[test]
    fn test_two_question_scenario() {
        let bank = QuestionBank::new(vec![
            Question::new("Q1", ["a", "b", "c", "d"], 2),
            Question::new("Q2", ["a", "b", "c", "d"], 1),
        ])
        .unwrap();
        let configuration = Configuration::default().with_round_count(2);
        let mut engine = GameEngine::new(bank);

        assert_eq!(
            engine.submit_answer(&configuration, Answer::Selected(2)),
            Some(GameState { score: 1, round: 2 })
        );
        assert_eq!(
            engine.submit_answer(&configuration, Answer::Selected(0)),
            Some(GameState { score: 1, round: 3 })
        );
        assert!(engine.current_question(&configuration).is_none());
    }

    #[test]
    fn test_round_count_bounds_game() {
        let mut engine = GameEngine::new(create_test_bank());
        let configuration = Configuration::default().with_round_count(1);

        assert_eq!(
            engine.current_question(&configuration).map(Question::text),
            Some("Q1")
        );
        engine.submit_answer(&configuration, Answer::Selected(2));
        assert!(engine.current_question(&configuration).is_none());
    }

    #[test]
    fn test_bank_size_bounds_game() {
        let mut engine = GameEngine::new(create_test_bank());
        let configuration = Configuration::default();
        assert_eq!(engine.total_rounds(&configuration), 3);

        for _ in 0..3 {
            assert!(engine.current_question(&configuration).is_some());
            engine.submit_answer(&configuration, Answer::TimedOut);
        }

        assert!(engine.current_question(&configuration).is_none());
    }

    #[test]
    fn test_submit_after_end_is_noop() {
        let mut engine = GameEngine::new(create_test_bank());
        let configuration = Configuration::default().with_round_count(1);

        engine.submit_answer(&configuration, Answer::Selected(2));
        let finished = engine.state();

        assert_eq!(
            engine.submit_answer(&configuration, Answer::Selected(1)),
            None
        );
        assert_eq!(engine.state(), finished);
    }

    #[test]
    fn test_reset_game() {
        let mut engine = GameEngine::new(create_test_bank());
        let configuration = Configuration::default().with_round_count(3);

        engine.submit_answer(&configuration, Answer::Selected(2));
        engine.submit_answer(&configuration, Answer::Selected(1));
        engine.reset_game();

        assert_eq!(engine.state(), GameState::default());
        assert_eq!(configuration.round_count(), 3);
        assert_eq!(
            engine.current_question(&configuration).map(Question::text),
            Some("Q1")
        );
    }

    #[test]
    fn test_round_count_change_applies_immediately() {
        let mut engine = GameEngine::new(create_test_bank());
        let mut configuration = Configuration::default();

        engine.submit_answer(&configuration, Answer::TimedOut);
        engine.submit_answer(&configuration, Answer::TimedOut);
        configuration.set_round_count(2);

        assert!(engine.current_question(&configuration).is_none());
    }

    #[test]
    fn test_empty_bank_has_no_question() {
        let engine = GameEngine::new(QuestionBank::new(Vec::new()).unwrap());
        assert!(engine.current_question(&Configuration::default()).is_none());
        assert_eq!(engine.total_rounds(&Configuration::default()), 0);
    }

    #[test]
    fn test_completed_rounds() {
        let state = GameState { score: 3, round: 6 };
        assert_eq!(state.completed_rounds(), 5);
    }

    fn answer_strategy() -> impl Strategy<Value = Answer> {
        prop_oneof![
            (0usize..6).prop_map(Answer::Selected),
            Just(Answer::TimedOut),
        ]
    }

    proptest! {
        #[test]
        fn score_never_exceeds_completed_rounds(
            round_count in 1usize..=20,
            answers in proptest::collection::vec(answer_strategy(), 0..40),
        ) {
            let configuration = Configuration::default().with_round_count(round_count);
            let mut engine = GameEngine::new(QuestionBank::default());

            for answer in answers {
                let before = engine.state();
                let question = engine.current_question(&configuration).cloned();

                match engine.submit_answer(&configuration, answer) {
                    Some(after) => {
                        let question = question.unwrap();
                        prop_assert_eq!(after.round, before.round + 1);
                        prop_assert_eq!(
                            after.score,
                            before.score + usize::from(question.is_correct(answer))
                        );
                    }
                    None => {
                        prop_assert!(question.is_none());
                        prop_assert_eq!(engine.state(), before);
                    }
                }

                let state = engine.state();
                prop_assert!(state.score <= state.completed_rounds());
            }
        }

        #[test]
        fn reset_always_restarts(
            answers in proptest::collection::vec(answer_strategy(), 0..25),
        ) {
            let configuration = Configuration::default();
            let mut engine = GameEngine::new(QuestionBank::default());

            for answer in answers {
                engine.submit_answer(&configuration, answer);
            }
            engine.reset_game();

            prop_assert_eq!(engine.state(), GameState { score: 0, round: 1 });
            prop_assert_eq!(configuration.round_count(), 10);
        }
    }
}
