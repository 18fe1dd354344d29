pub mod scorer;
pub mod timer;

use std::ops::AddAssign;
use std::time::{Duration, SystemTime};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundStatus {
    Pending,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    Player,
    Opponent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub round_id: u64,
    pub source: Source,
    pub category: Option<String>,
    pub value: String,
    pub submitted_at: SystemTime,
}

impl Entry {
    pub fn new(round_id: u64, source: Source, category: Option<String>, value: String) -> Self {
        Entry {
            round_id,
            source,
            category,
            value,
            submitted_at: SystemTime::now(),
        }
    }

    pub fn opponent(round_id: u64, category: Option<String>, value: String) -> Self {
        Entry::new(round_id, Source::Opponent, category, value)
    }

    pub fn normalized_value(&self) -> String {
        self.value.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTally {
    pub player: u32,
    pub opponent: u32,
}

impl ScoreTally {
    pub fn new(player: u32, opponent: u32) -> Self {
        ScoreTally { player, opponent }
    }
}

impl AddAssign for ScoreTally {
    fn add_assign(&mut self, other: Self) {
        self.player += other.player;
        self.opponent += other.opponent;
    }
}

#[derive(Debug, Clone)]
pub struct Round {
    pub id: u64,
    pub prompt: String,
    pub categories: Vec<String>,
    pub duration_seconds: u32,
    deadline: Option<SystemTime>,
    status: RoundStatus,
    entries: Vec<Entry>,
    tally: Option<ScoreTally>,
}

impl Round {
    pub fn new(id: u64, prompt: &str, categories: Vec<String>, duration_seconds: u32) -> Self {
        Round {
            id,
            prompt: prompt.to_string(),
            categories,
            duration_seconds,
            deadline: None,
            status: RoundStatus::Pending,
            entries: Vec::default(),
            tally: None,
        }
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn deadline(&self) -> Option<SystemTime> {
        self.deadline
    }

    pub fn tally(&self) -> Option<ScoreTally> {
        self.tally
    }

    pub fn is_scored(&self) -> bool {
        self.tally.is_some()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn player_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries_from(Source::Player)
    }

    pub fn opponent_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries_from(Source::Opponent)
    }

    fn entries_from(&self, source: Source) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.source == source)
    }

    pub fn activate(&mut self) {
        if self.status == RoundStatus::Pending {
            self.status = RoundStatus::Active;
            self.deadline =
                Some(SystemTime::now() + Duration::from_secs(self.duration_seconds.into()));
        }
    }

    /// Returns `true` only for the call that actually ended the round.
    pub fn end(&mut self) -> bool {
        if self.status == RoundStatus::Active {
            self.status = RoundStatus::Ended;
            true
        } else {
            false
        }
    }

    pub fn collect(&mut self, category: Option<String>, value: &str) -> bool {
        let value = value.trim();
        if self.status != RoundStatus::Active || value.is_empty() {
            return false;
        }
        self.entries.push(Entry::new(
            self.id,
            Source::Player,
            category,
            value.to_string(),
        ));
        true
    }

    /// Stores the opponent side once the round is over. Entries for other rounds are discarded.
    pub fn add_opponent_entries(&mut self, entries: Vec<Entry>) -> bool {
        if self.status != RoundStatus::Ended || self.is_scored() {
            return false;
        }
        self.entries.extend(
            entries
                .into_iter()
                .filter(|entry| entry.round_id == self.id)
                .map(|entry| Entry {
                    source: Source::Opponent,
                    ..entry
                }),
        );
        true
    }

    pub fn set_tally(&mut self, tally: ScoreTally) -> bool {
        if self.status != RoundStatus::Ended || self.is_scored() {
            return false;
        }
        self.tally = Some(tally);
        true
    }
}
