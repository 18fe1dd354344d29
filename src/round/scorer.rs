use std::collections::BTreeSet;

use super::{Entry, Round, ScoreTally};

/// Category of a board entry that took an opponent piece.
pub const CAPTURE: &str = "capture";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringRule {
    Categories { independent: u32, shared: u32 },
    WordList { independent: u32, shared: u32 },
    PerMove { points: u32 },
    Captures { points: u32 },
}

impl ScoringRule {
    pub fn score(&self, round: &Round) -> ScoreTally {
        let player: Vec<&Entry> = round.player_entries().collect();
        let opponent: Vec<&Entry> = round.opponent_entries().collect();
        self.tally(&round.prompt, &round.categories, &player, &opponent)
    }

    pub fn tally(
        &self,
        prompt: &str,
        categories: &[String],
        player: &[&Entry],
        opponent: &[&Entry],
    ) -> ScoreTally {
        match *self {
            ScoringRule::Categories {
                independent,
                shared,
            } => {
                let mut tally = ScoreTally::default();
                for category in categories {
                    let player_answer = valid_answer(prompt, last_answer(player, category));
                    let opponent_answer = valid_answer(prompt, last_answer(opponent, category));
                    match (player_answer, opponent_answer) {
                        (Some(player_answer), Some(opponent_answer))
                            if player_answer == opponent_answer =>
                        {
                            tally.player += shared;
                            tally.opponent += shared;
                        }
                        (player_answer, opponent_answer) => {
                            if player_answer.is_some() {
                                tally.player += independent;
                            }
                            if opponent_answer.is_some() {
                                tally.opponent += independent;
                            }
                        }
                    }
                }
                tally
            }
            ScoringRule::WordList {
                independent,
                shared,
            } => {
                let player_words = valid_words(prompt, player);
                let opponent_words = valid_words(prompt, opponent);
                let in_common = player_words.intersection(&opponent_words).count() as u32;
                let player_only = player_words.len() as u32 - in_common;
                let opponent_only = opponent_words.len() as u32 - in_common;
                ScoreTally::new(
                    player_only * independent + in_common * shared,
                    opponent_only * independent + in_common * shared,
                )
            }
            ScoringRule::PerMove { points } => {
                ScoreTally::new(player.len() as u32 * points, opponent.len() as u32 * points)
            }
            ScoringRule::Captures { points } => ScoreTally::new(
                count_captures(player) * points,
                count_captures(opponent) * points,
            ),
        }
    }
}

fn last_answer<'a>(entries: &[&'a Entry], category: &str) -> Option<&'a Entry> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.category.as_deref() == Some(category))
        .copied()
}

fn valid_answer(prompt: &str, entry: Option<&Entry>) -> Option<String> {
    entry
        .map(Entry::normalized_value)
        .filter(|value| is_valid(prompt, value))
}

fn valid_words(prompt: &str, entries: &[&Entry]) -> BTreeSet<String> {
    entries
        .iter()
        .map(|entry| entry.normalized_value())
        .filter(|value| is_valid(prompt, value))
        .collect()
}

fn is_valid(prompt: &str, normalized_value: &str) -> bool {
    !normalized_value.is_empty() && normalized_value.starts_with(&prompt.trim().to_lowercase())
}

fn count_captures(entries: &[&Entry]) -> u32 {
    entries
        .iter()
        .filter(|entry| entry.category.as_deref() == Some(CAPTURE))
        .count() as u32
}
