use serde::{Deserialize, Serialize};

use crate::board::coloring::Area;
use crate::board::Board;
use crate::game::game_fsm::GameFsmState;
use crate::game::mode::GameMode;
use crate::game::{GameSnapshot, RoundSummary};
use crate::round::{Entry, Round, RoundStatus, ScoreTally, Source};

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageIn {
    StartRound,
    SubmitEntry {
        category: Option<String>,
        value: String,
    },
    Stop,
    ExitToMenu,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageOut {
    #[serde(rename_all = "camelCase")]
    GameState {
        id: String,
        mode: GameMode,
        state: String,
        time_left: u32,
        round: Option<RoundDto>,
        board: Option<BoardDto>,
        totals: ScoreTally,
        history: Vec<RoundSummary>,
    },
    Error {
        code: String,
        title: String,
        detail: String,
    },
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoundDto {
    pub id: u64,
    pub prompt: String,
    pub categories: Vec<String>,
    pub status: RoundStatus,
    pub duration_seconds: u32,
    pub entries: Vec<EntryDto>,
    pub tally: Option<ScoreTally>,
}

impl From<Round> for RoundDto {
    fn from(round: Round) -> Self {
        RoundDto {
            id: round.id,
            status: round.status(),
            tally: round.tally(),
            entries: round.entries().iter().map(EntryDto::from).collect(),
            prompt: round.prompt,
            categories: round.categories,
            duration_seconds: round.duration_seconds,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub source: Source,
    pub category: Option<String>,
    pub value: String,
}

impl From<&Entry> for EntryDto {
    fn from(entry: &Entry) -> Self {
        EntryDto {
            source: entry.source,
            category: entry.category.clone(),
            value: entry.value.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BoardDto {
    Chess { rows: Vec<Vec<String>> },
    Coloring { areas: Vec<AreaDto> },
}

impl From<Board> for BoardDto {
    fn from(board: Board) -> Self {
        match board {
            Board::Chess(board) => BoardDto::Chess { rows: board.rows() },
            Board::Coloring(board) => BoardDto::Coloring {
                areas: board.areas().iter().map(AreaDto::from).collect(),
            },
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AreaDto {
    pub id: u8,
    pub number: u8,
    pub x: u16,
    pub y: u16,
    pub color: Option<&'static str>,
    pub colored_by: Option<Source>,
}

impl From<&Area> for AreaDto {
    fn from(area: &Area) -> Self {
        AreaDto {
            id: area.id,
            number: area.number,
            x: area.x,
            y: area.y,
            color: area.color(),
            colored_by: area.colored_by,
        }
    }
}

impl From<GameSnapshot> for WsMessageOut {
    fn from(snapshot: GameSnapshot) -> Self {
        WsMessageOut::GameState {
            id: snapshot.id,
            mode: snapshot.mode,
            state: state_to_string(&snapshot.state),
            time_left: snapshot.time_left,
            round: snapshot.round.map(RoundDto::from),
            board: snapshot.board.map(BoardDto::from),
            totals: snapshot.totals,
            history: snapshot.history,
        }
    }
}

pub fn state_to_string(state: &GameFsmState) -> String {
    match state {
        GameFsmState::Menu => "menu",
        GameFsmState::Active => "active",
        GameFsmState::Ended => "ended",
    }
    .to_string()
}
