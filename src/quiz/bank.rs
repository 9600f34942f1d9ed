//! The ordered, read-only collection of questions a game draws from
//!
//! A bank is built once at startup, either from the built-in question list
//! or from a JSON literal, and is never mutated afterwards. Questions are
//! addressed by their 1-based round number.

use garde::Validate;
use itertools::Itertools;
use once_cell_serde::sync::OnceCell;
use serde::Serialize;

use super::{Error, question::Question};

/// An immutable, ordered list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(transparent)]
pub struct QuestionBank {
    #[garde(dive)]
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a bank from a list of questions
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if any question breaks the quiz limits,
    /// such as a correct index outside of the four options.
    pub fn new(questions: Vec<Question>) -> Result<Self, Error> {
        let bank = Self { questions };
        bank.validate()?;
        Ok(bank)
    }

    /// Builds a bank from a JSON array of questions
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the JSON cannot be parsed and
    /// [`Error::Invalid`] if a parsed question is invalid.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Returns the question at the 1-based position `index`
    ///
    /// `None` is returned for 0 and for positions past the end of the bank.
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        index
            .checked_sub(1)
            .and_then(|position| self.questions.get(position))
    }

    /// Returns the number of questions in the bank
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Checks if the bank has no questions at all
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterates over the questions in round order
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for QuestionBank {
    /// The built-in question list (see [`default_bank`])
    fn default() -> Self {
        default_bank().clone()
    }
}

static DEFAULT_BANK: OnceCell<QuestionBank> = OnceCell::new();

/// Returns the built-in Minecraft trivia bank
pub fn default_bank() -> &'static QuestionBank {
    DEFAULT_BANK.get_or_init(|| QuestionBank {
        questions: builtin_questions(),
    })
}

fn builtin_questions() -> Vec<Question> {
    [
        (
            "What is the most durable material in the game?",
            ["Iron", "Diamond", "Netherite", "Gold"],
            2,
        ),
        (
            "How tall is a Minecraft player?",
            ["1.5 blocks", "2 blocks", "1.8 blocks", "2.5 blocks"],
            1,
        ),
        (
            "Which mob is friendly to the player and can help fight?",
            ["Skeleton", "Wolf", "Enderman", "Ravager"],
            1,
        ),
        (
            "Which tool is best for breaking stone?",
            ["Sword", "Shovel", "Axe", "Pickaxe"],
            3,
        ),
        (
            "Which mob attacks using arrows?",
            ["Creeper", "Skeleton", "Enderman", "Iron Golem"],
            1,
        ),
        (
            "Which food restores the most hunger?",
            ["Carrot", "Cooked Steak", "Mushroom Stew", "Raw Cod"],
            1,
        ),
        (
            "What is the main ingredient for making glass?",
            ["Water", "Sand", "Stone", "Milk"],
            1,
        ),
        (
            "Which structure naturally generates in the Nether?",
            [
                "Abandoned Mineshafts",
                "End Cities",
                "Nether Fortresses",
                "Woodland Mansions",
            ],
            2,
        ),
        (
            "Which mob explodes when it gets close to the player?",
            ["Zombie", "Phantom", "Creeper", "Wither"],
            2,
        ),
        (
            "Which mineral can only be found in the Nether?",
            ["Copper", "Redstone", "Netherite", "Lapis Lazuli"],
            2,
        ),
        (
            "Which mob drops Ender Pearls when killed?",
            ["Enderman", "Blaze", "Skeleton", "Ghast"],
            0,
        ),
        (
            "What do you need to activate an End Portal?",
            ["Dragon Eggs", "Eyes of Ender", "Nether Stars", "Diamond Blocks"],
            1,
        ),
        (
            "Which of these mobs does not burn in sunlight?",
            ["Skeleton", "Zombie", "Spider", "Zombie Pigman"],
            2,
        ),
        (
            "How many diamonds do you need to craft a diamond sword?",
            ["1", "2", "3", "4"],
            1,
        ),
        (
            "What is the maximum number of Eyes of Ender needed to activate an End Portal?",
            ["10", "12", "14", "16"],
            1,
        ),
        (
            "Which potion allows you to fly in survival mode?",
            [
                "Potion of Levitation",
                "Potion of Speed",
                "There is no potion for flying",
                "Potion of Invisibility",
            ],
            2,
        ),
        (
            "Which mob is found deep underground and detects vibrations?",
            ["Warden", "Wither", "Snow Golem", "Piglin"],
            0,
        ),
        (
            "What is needed to craft an Enchanting Table besides a book?",
            [
                "3 Obsidian and 2 Diamonds",
                "4 Obsidian and 2 Diamonds",
                "2 Obsidian and 3 Diamonds",
                "4 Obsidian and 1 Diamond",
            ],
            1,
        ),
        (
            "Which item allows you to breathe underwater?",
            ["Iron Helmet", "Turtle Helmet", "Rope", "Smooth Stone"],
            1,
        ),
        (
            "What is the name of Minecraft's original creator?",
            ["Markus Persson", "Jens Bergensten", "Bill Gates", "Steve Notch"],
            0,
        ),
    ]
    .into_iter()
    .map(|(text, options, correct_index)| Question::new(text, options, correct_index))
    .collect_vec()
}
