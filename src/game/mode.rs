use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::chess::ChessBoard;
use crate::board::coloring::ColoringBoard;
use crate::board::Board;
use crate::config::GameSettings;
use crate::round::scorer::ScoringRule;
use crate::round::Round;

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const STOP_CATEGORIES: [&str; 7] = [
    "nombre",
    "pais",
    "alimento",
    "objeto",
    "animal",
    "color",
    "profesion",
];

pub const WORDS_CATEGORIES: [&str; 6] = [
    "Animales", "Países", "Comida", "Objetos", "Nombres", "Colores",
];

pub const STOP_INDEPENDENT_POINTS: u32 = 10;
pub const STOP_SHARED_POINTS: u32 = 5;
pub const WORDS_INDEPENDENT_POINTS: u32 = 2;
pub const WORDS_SHARED_POINTS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentStrategy {
    LocalRandom,
    Delegated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSetup {
    pub prompt: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    Stop,
    Words,
    Chess,
    Coloring,
}

impl GameMode {
    pub fn round_duration(&self, settings: &GameSettings) -> u32 {
        match self {
            GameMode::Stop => settings.stop_round_seconds,
            GameMode::Words => settings.words_round_seconds,
            GameMode::Chess | GameMode::Coloring => settings.board_turn_seconds,
        }
    }

    pub fn setup_round<R: Rng + ?Sized>(&self, rng: &mut R) -> RoundSetup {
        match self {
            GameMode::Stop => RoundSetup {
                prompt: random_letter(rng),
                categories: STOP_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            },
            GameMode::Words => RoundSetup {
                prompt: random_letter(rng),
                categories: WORDS_CATEGORIES
                    .choose(rng)
                    .map(|category| vec![category.to_string()])
                    .unwrap_or_default(),
            },
            GameMode::Chess => RoundSetup {
                prompt: "blancas".to_string(),
                categories: Vec::default(),
            },
            GameMode::Coloring => RoundSetup {
                prompt: "colorear".to_string(),
                categories: Vec::default(),
            },
        }
    }

    pub fn new_board(&self) -> Option<Board> {
        match self {
            GameMode::Chess => Some(Board::Chess(ChessBoard::default())),
            GameMode::Coloring => Some(Board::Coloring(ColoringBoard::default())),
            GameMode::Stop | GameMode::Words => None,
        }
    }

    /// Acceptance rule of the word modes, applied before an answer reaches the round.
    pub fn accept_answer(
        &self,
        round: &Round,
        category: Option<&str>,
        value: &str,
    ) -> Option<Option<String>> {
        match self {
            GameMode::Stop => category
                .filter(|category| round.categories.iter().any(|c| c.as_str() == *category))
                .map(|category| Some(category.to_string())),
            GameMode::Words => {
                let letter = round.prompt.to_lowercase();
                value
                    .trim()
                    .to_lowercase()
                    .starts_with(&letter)
                    .then(|| round.categories.first().cloned())
            }
            GameMode::Chess | GameMode::Coloring => None,
        }
    }

    pub fn opponent_strategy(&self) -> OpponentStrategy {
        match self {
            GameMode::Stop | GameMode::Words => OpponentStrategy::Delegated,
            GameMode::Chess | GameMode::Coloring => OpponentStrategy::LocalRandom,
        }
    }

    pub fn scoring_rule(&self) -> ScoringRule {
        match self {
            GameMode::Stop => ScoringRule::Categories {
                independent: STOP_INDEPENDENT_POINTS,
                shared: STOP_SHARED_POINTS,
            },
            GameMode::Words => ScoringRule::WordList {
                independent: WORDS_INDEPENDENT_POINTS,
                shared: WORDS_SHARED_POINTS,
            },
            GameMode::Chess => ScoringRule::Captures { points: 1 },
            GameMode::Coloring => ScoringRule::PerMove { points: 1 },
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> String {
    let index = rng.gen_range(0..LETTERS.len());
    LETTERS[index..=index].to_string()
}
