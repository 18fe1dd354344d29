pub mod actor;
pub mod actor_client;
pub mod game_fsm;
pub mod mode;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_fsm::StateMachine;
use serde::Serialize;

use crate::board::Board;
use crate::config::GameSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::mode::{GameMode, OpponentStrategy};
use crate::metrics::ROUNDS_SCORED;
use crate::opponent::{self, OpponentRequest};
use crate::round::timer::{RoundTimer, Tick};
use crate::round::{Entry, Round, ScoreTally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    TimeUp,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_id: u64,
    pub prompt: String,
    pub tally: ScoreTally,
}

#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub id: String,
    pub mode: GameMode,
    pub state: GameFsmState,
    pub time_left: u32,
    pub round: Option<Round>,
    pub board: Option<Board>,
    pub totals: ScoreTally,
    pub history: Vec<RoundSummary>,
}

pub struct Game {
    id: String,
    mode: GameMode,
    settings: GameSettings,
    fsm: StateMachine<GameFsm>,
    timer: RoundTimer,
    round: Option<Round>,
    next_round_id: u64,
    board: Option<Board>,
    history: Vec<RoundSummary>,
    totals: ScoreTally,
    is_player_connected: bool,
    rng: StdRng,
}

impl Game {
    pub fn new(id: &str, mode: GameMode, settings: GameSettings) -> Self {
        Game::with_rng(id, mode, settings, StdRng::from_entropy())
    }

    pub fn with_rng(id: &str, mode: GameMode, settings: GameSettings, rng: StdRng) -> Self {
        Self {
            id: id.to_string(),
            mode,
            settings,
            fsm: StateMachine::default(),
            timer: RoundTimer::default(),
            round: None,
            next_round_id: 1,
            board: mode.new_board(),
            history: Vec::default(),
            totals: ScoreTally::default(),
            is_player_connected: false,
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn totals(&self) -> ScoreTally {
        self.totals
    }

    pub fn time_left(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.clone(),
            mode: self.mode,
            state: self.state().clone(),
            time_left: self.time_left(),
            round: self.round.clone(),
            board: self.board.clone(),
            totals: self.totals,
            history: self.history.clone(),
        }
    }

    pub fn is_player_connected(&self) -> bool {
        self.is_player_connected
    }

    pub fn connect_player(&mut self) -> Result<(), Error> {
        if self.is_player_connected {
            return Err(Error::Domain(DomainError::PlayerAlreadyConnected(
                self.id.to_string(),
            )));
        }
        self.is_player_connected = true;
        Ok(())
    }

    pub fn disconnect_player(&mut self) {
        self.is_player_connected = false;
    }

    pub fn start_round(&mut self) -> Result<(), Error> {
        match self.state() {
            GameFsmState::Active => {
                return Err(Error::Domain(DomainError::InvalidStateForStartingRound(
                    GameFsmState::Active,
                )))
            }
            GameFsmState::Ended => {
                if let Some(round) = self.round.as_ref().filter(|round| !round.is_scored()) {
                    return Err(Error::Domain(DomainError::RoundIsBeingScored(round.id)));
                }
            }
            GameFsmState::Menu => {}
        }

        let from_menu = self.state() == &GameFsmState::Menu;
        if let Some(board) = self.board.as_mut() {
            if from_menu || board.is_complete() {
                board.reset();
            }
        }

        self.process_event(&GameFsmInput::StartRound)?;

        let setup = self.mode.setup_round(&mut self.rng);
        let duration = self.mode.round_duration(&self.settings);
        let mut round = Round::new(self.next_round_id, &setup.prompt, setup.categories, duration);
        self.next_round_id += 1;
        round.activate();
        self.timer.cancel();
        self.timer.start(duration);
        log::info!(
            "Round started. GameId: '{}', Mode: '{}', RoundId: '{}', Prompt: '{}'.",
            self.id,
            self.mode,
            round.id,
            round.prompt
        );
        self.round = Some(round);
        Ok(())
    }

    pub fn submit(
        &mut self,
        category: Option<String>,
        value: &str,
    ) -> Result<Option<OpponentRequest>, Error> {
        if self.state() != &GameFsmState::Active {
            return Err(Error::Domain(DomainError::InvalidStateForSubmission(
                self.state().to_owned(),
                GameFsmState::Active,
            )));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(Error::log_and_create_internal(&format!(
                "Missing active round. GameId: '{}'.",
                self.id
            )));
        };

        match self.board.as_mut() {
            Some(board) => match board.apply_player_move(value) {
                Some(applied) => {
                    let category = applied
                        .captured
                        .then(|| crate::round::scorer::CAPTURE.to_string());
                    round.collect(category, &applied.notation);
                    self.terminate_round(Termination::Stop)
                }
                None => Ok(None),
            },
            None => {
                if let Some(category) = self.mode.accept_answer(round, category.as_deref(), value)
                {
                    round.collect(category, value);
                }
                Ok(None)
            }
        }
    }

    pub fn tick(&mut self) -> Result<Option<OpponentRequest>, Error> {
        if self.state() != &GameFsmState::Active {
            return Ok(None);
        }
        match self.timer.tick() {
            Tick::Expired => self.terminate_round(Termination::TimeUp),
            Tick::Running(_) | Tick::Idle => Ok(None),
        }
    }

    pub fn stop(&mut self) -> Result<Option<OpponentRequest>, Error> {
        if self.state() != &GameFsmState::Active {
            return Err(Error::Domain(DomainError::InvalidStateForStoppingRound(
                self.state().to_owned(),
                GameFsmState::Active,
            )));
        }
        self.terminate_round(Termination::Stop)
    }

    /// Ends the active round once. Later calls leave the ended round untouched.
    pub fn terminate_round(
        &mut self,
        termination: Termination,
    ) -> Result<Option<OpponentRequest>, Error> {
        if self.state() != &GameFsmState::Active {
            return Ok(None);
        }
        self.timer.stop();
        self.process_event(match termination {
            Termination::TimeUp => &GameFsmInput::TimeUp,
            Termination::Stop => &GameFsmInput::Stop,
        })?;

        let Some(round) = self.round.as_mut() else {
            return Err(Error::log_and_create_internal(&format!(
                "Ended a round that does not exist. GameId: '{}'.",
                self.id
            )));
        };
        round.end();
        let round_id = round.id;
        log::info!(
            "Round ended. GameId: '{}', RoundId: '{round_id}', Termination: '{termination:?}'.",
            self.id
        );

        match self.mode.opponent_strategy() {
            OpponentStrategy::Delegated => Ok(Some(OpponentRequest::from_round(self.mode, round))),
            OpponentStrategy::LocalRandom => {
                let entries = match self.board.as_mut() {
                    Some(board) if !board.is_complete() => {
                        opponent::respond_locally(round_id, board, &mut self.rng)
                    }
                    _ => Vec::default(),
                };
                self.apply_opponent_entries(round_id, entries);
                Ok(None)
            }
        }
    }

    pub fn apply_opponent_entries(&mut self, round_id: u64, entries: Vec<Entry>) -> bool {
        let Some(round) = self.round.as_mut().filter(|round| round.id == round_id) else {
            log::info!(
                "Dropping opponent answers for a discarded round. GameId: '{}', RoundId: '{round_id}'.",
                self.id
            );
            return false;
        };
        if !round.add_opponent_entries(entries) {
            return false;
        }
        let tally = self.mode.scoring_rule().score(round);
        round.set_tally(tally);
        self.totals += tally;
        self.history.push(RoundSummary {
            round_id,
            prompt: round.prompt.clone(),
            tally,
        });
        ROUNDS_SCORED.inc();
        true
    }

    pub fn exit_to_menu(&mut self) -> Result<(), Error> {
        match self.state().clone() {
            GameFsmState::Menu => Ok(()),
            GameFsmState::Active => {
                self.timer.cancel();
                self.process_event(&GameFsmInput::Cancel)?;
                if let Some(round) = self.round.take() {
                    log::info!(
                        "Round cancelled. GameId: '{}', RoundId: '{}'.",
                        self.id,
                        round.id
                    );
                }
                Ok(())
            }
            GameFsmState::Ended => self.process_event(&GameFsmInput::BackToMenu),
        }
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => Ok(()),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}
