use serde::{Deserialize, Serialize};

use super::{test_app::TestApp, test_player::TestPlayer};

pub struct TestGame {
    pub app: TestApp,
    pub id: String,
}

impl TestGame {
    /// Opens the game websocket and reads the first state sent by the server.
    pub async fn connect(&self) -> Result<(TestPlayer, GameState), String> {
        let mut player = self.app.connect_player(&self.id).await;
        let state = player.receive_game_state().await?;
        Ok((player, state))
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageIn {
    GameState(GameState),
    Error {
        code: String,
        title: String,
        detail: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageOut {
    StartRound,
    SubmitEntry {
        category: Option<String>,
        value: String,
    },
    Stop,
    ExitToMenu,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: String,
    pub mode: String,
    pub state: String,
    pub time_left: u32,
    pub round: Option<Round>,
    pub board: Option<serde_json::Value>,
    pub totals: Tally,
    pub history: Vec<RoundSummary>,
}

impl GameState {
    pub fn is_scored(&self) -> bool {
        self.round
            .as_ref()
            .is_some_and(|round| round.tally.is_some())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: u64,
    pub prompt: String,
    pub categories: Vec<String>,
    pub status: String,
    pub entries: Vec<Entry>,
    pub tally: Option<Tally>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Entry {
    pub source: String,
    pub category: Option<String>,
    pub value: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub player: u32,
    pub opponent: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_id: u64,
    pub prompt: String,
    pub tally: Tally,
}
