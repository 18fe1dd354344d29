use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::SendError;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender, WeakSender},
};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::{GameSettings, TextGenerationSettings};
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::game_fsm::GameFsmState;
use crate::game::mode::GameMode;
use crate::game::{Game, GameSnapshot};
use crate::game_factory::actor_client::GameFactoryClient;
use crate::metrics::ACTIVE_GAMES;
use crate::opponent::{self, OpponentRequest};
use crate::round::Entry;
use crate::text_generation::TextGenerator;

pub struct GameActor {
    game: Game,
    game_rx: Receiver<GameCommand>,
    game_tx: WeakSender<GameCommand>,
    broadcast_tx: broadcast::Sender<GameWideEvent>,
    game_factory: GameFactoryClient,
    text_generator: Arc<dyn TextGenerator>,
    opponent_timeout: Duration,
    inactivity_timeout: Duration,
    tick_interval: Duration,
    idle_since: Option<Instant>,
}

impl GameActor {
    pub fn spawn(
        id: &str,
        mode: GameMode,
        settings: GameSettings,
        text_generation: &TextGenerationSettings,
        text_generator: Arc<dyn TextGenerator>,
        game_factory: GameFactoryClient,
    ) -> GameClient {
        let inactivity_timeout = settings.inactivity_timeout();
        let tick_interval = settings.tick_interval();
        let game = Game::new(id, mode, settings);
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<GameWideEvent>,
            broadcast::Receiver<GameWideEvent>,
        ) = broadcast::channel(32);

        tokio::spawn(
            GameActor {
                game,
                game_rx,
                game_tx: game_tx.downgrade(),
                broadcast_tx,
                game_factory,
                text_generator,
                opponent_timeout: text_generation.timeout(),
                inactivity_timeout,
                tick_interval,
                idle_since: Some(Instant::now()),
            }
            .start(),
        );

        GameClient { game_tx }
    }

    async fn start(mut self) {
        ACTIVE_GAMES.inc();
        let mut ticker = time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = self.game_rx.recv() => {
                    let Some(command) = command else {
                        log::info!("Game channel has been dropped. Stopping game actor.");
                        break;
                    };
                    let was_active = self.game.state() == &GameFsmState::Active;
                    self.handle_command(command);
                    if !was_active && self.game.state() == &GameFsmState::Active {
                        ticker.reset();
                    }
                    let _ = self.send_game_state();
                }
                _ = ticker.tick() => {
                    if self.is_inactive() {
                        log::info!(
                            "No activity detected in game {} after {} seconds. Stopping game actor.",
                            self.game.id(),
                            self.inactivity_timeout.as_secs()
                        );
                        break;
                    }
                    if self.game.state() != &GameFsmState::Active {
                        continue;
                    }
                    let result = self.game.tick();
                    if let Err(error) = self.handle_round_end(result) {
                        log::error!("The Round could not be ended on time up. GameId: '{}', Error: '{error}'.", self.game.id());
                    }
                    let _ = self.send_game_state();
                }
            }
        }

        self.stop_game().await;
        ACTIVE_GAMES.dec();
    }

    fn handle_command(&mut self, command: GameCommand) {
        let (result, response_tx) = match command {
            GameCommand::ConnectPlayer { response_tx } => {
                let result = self.game.connect_player().map(|_| {
                    self.idle_since = None;
                    GameEvent::PlayerConnected {
                        broadcast_rx: self.broadcast_tx.subscribe(),
                    }
                });
                (result, response_tx)
            }
            GameCommand::DisconnectPlayer => {
                self.game.disconnect_player();
                self.idle_since = Some(Instant::now());
                return;
            }
            GameCommand::StartRound { response_tx } => {
                (self.game.start_round().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::SubmitEntry {
                category,
                value,
                response_tx,
            } => {
                let result = self.game.submit(category, &value);
                (self.handle_round_end(result), response_tx)
            }
            GameCommand::StopRound { response_tx } => {
                let result = self.game.stop();
                (self.handle_round_end(result), response_tx)
            }
            GameCommand::ExitToMenu { response_tx } => {
                (self.game.exit_to_menu().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::OpponentAnswered { round_id, entries } => {
                self.game.apply_opponent_entries(round_id, entries);
                return;
            }
        };

        let event = match result {
            Ok(event) => event,
            Err(error) => GameEvent::Error { error },
        };
        if let Err(error) = response_tx.send(event) {
            log::error!("Sent GameEvent to the Player but the response channel is closed. Disconnecting the Player. GameId: '{}', Event: '{error}'.", self.game.id());
            self.game.disconnect_player();
            self.idle_since = Some(Instant::now());
        }
    }

    fn handle_round_end(
        &self,
        result: Result<Option<OpponentRequest>, Error>,
    ) -> Result<GameEvent, Error> {
        if let Some(request) = result? {
            self.request_opponent_answers(request);
        }
        Ok(GameEvent::Ok)
    }

    fn request_opponent_answers(&self, request: OpponentRequest) {
        let Some(game_tx) = self.game_tx.upgrade() else {
            return;
        };
        let text_generator = Arc::clone(&self.text_generator);
        let timeout = self.opponent_timeout;
        tokio::spawn(async move {
            let entries = opponent::respond(text_generator.as_ref(), &request, timeout).await;
            let round_id = request.round_id;
            if let Err(error) = game_tx
                .send(GameCommand::OpponentAnswered { round_id, entries })
                .await
            {
                log::warn!("Opponent answers arrived after the Game stopped. RoundId: '{round_id}', Error: '{error}'.");
            }
        });
    }

    fn is_inactive(&self) -> bool {
        self.idle_since
            .is_some_and(|idle_since| idle_since.elapsed() >= self.inactivity_timeout)
    }

    fn send_game_state(&self) -> Result<usize, SendError<GameWideEvent>> {
        self.broadcast_tx
            .send(GameWideEvent::GameState(Box::new(self.game.snapshot())))
    }

    async fn stop_game(self) {
        let game_id = self.game.id();
        if let Err(error) = self.game_factory.remove_game(game_id).await {
            log::error!("The GameFactory channel is closed, can't remove the Game. GameId: '{game_id}', Error: '{error}'.");
        }
    }
}

pub(crate) enum GameCommand {
    ConnectPlayer {
        response_tx: OneshotSender<GameEvent>,
    },
    DisconnectPlayer,
    StartRound {
        response_tx: OneshotSender<GameEvent>,
    },
    SubmitEntry {
        category: Option<String>,
        value: String,
        response_tx: OneshotSender<GameEvent>,
    },
    StopRound {
        response_tx: OneshotSender<GameEvent>,
    },
    ExitToMenu {
        response_tx: OneshotSender<GameEvent>,
    },
    OpponentAnswered {
        round_id: u64,
        entries: Vec<Entry>,
    },
}

#[derive(Debug)]
pub(crate) enum GameEvent {
    PlayerConnected {
        broadcast_rx: broadcast::Receiver<GameWideEvent>,
    },
    Ok,
    Error {
        error: Error,
    },
}

impl Display for GameEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameEvent::PlayerConnected { .. } => "GameEvent::PlayerConnected".to_string(),
                GameEvent::Ok => "GameEvent::Ok".to_string(),
                GameEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

#[derive(Clone, Debug)]
pub enum GameWideEvent {
    GameState(Box<GameSnapshot>),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use tokio::time::Instant;

    use crate::config::{GameSettings, TextGenerationSettings};
    use crate::error::domain_error::DomainError;
    use crate::error::Error;
    use crate::game::actor::GameWideEvent;
    use crate::game::actor_client::{GameClient, GameWideEventReceiver};
    use crate::game::game_fsm::GameFsmState;
    use crate::game::mode::GameMode;
    use crate::game::GameSnapshot;
    use crate::game_factory::actor::GameFactoryActor;
    use crate::round::ScoreTally;
    use crate::text_generation::scripted::ScriptedTextGenerator;
    use crate::text_generation::TextGenerator;

    fn settings(inactivity_timeout_seconds: u64) -> GameSettings {
        GameSettings {
            inactivity_timeout_seconds,
            tick_interval_millis: 10,
            stop_round_seconds: 100,
            words_round_seconds: 3,
            board_turn_seconds: 3,
            ..GameSettings::default()
        }
    }

    async fn spawn_game(
        mode: GameMode,
        text_generator: Arc<dyn TextGenerator>,
    ) -> (GameClient, GameWideEventReceiver) {
        spawn_game_with_settings(mode, settings(60), text_generator).await
    }

    async fn spawn_game_with_settings(
        mode: GameMode,
        settings: GameSettings,
        text_generator: Arc<dyn TextGenerator>,
    ) -> (GameClient, GameWideEventReceiver) {
        let text_generation = TextGenerationSettings {
            url: String::default(),
            timeout_seconds: 1,
        };
        let game_factory = GameFactoryActor::spawn(settings, text_generation, text_generator);
        let id = game_factory.create_game(mode).await.unwrap();
        let game = game_factory.get_game(&id).await.unwrap();
        let receiver = game.connect_player().await.unwrap();
        (game, receiver)
    }

    async fn wait_for(
        receiver: &mut GameWideEventReceiver,
        condition: impl Fn(&GameSnapshot) -> bool,
    ) -> GameSnapshot {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let GameWideEvent::GameState(snapshot) = receiver.next().await.unwrap();
                if condition(&snapshot) {
                    return *snapshot;
                }
            }
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn round_times_out_and_is_scored_with_the_delegated_answers() {
        let generator = Arc::new(ScriptedTextGenerator::new(vec![Ok(json!({ "words": [] }))]));
        let (game, mut receiver) = spawn_game(GameMode::Words, generator.clone()).await;

        game.start_round().await.unwrap();
        let snapshot = wait_for(&mut receiver, |snapshot| {
            snapshot.round.as_ref().is_some_and(|round| round.is_scored())
        })
        .await;

        assert_eq!(snapshot.state, GameFsmState::Ended);
        assert_eq!(snapshot.time_left, 0);
        assert_eq!(snapshot.totals, ScoreTally::default());
        assert_eq!(generator.prompts().len(), 1);
    }

    #[tokio::test]
    async fn round_lasts_its_full_duration_whenever_it_starts() {
        let settings = GameSettings {
            tick_interval_millis: 200,
            board_turn_seconds: 1,
            ..settings(60)
        };
        let generator = Arc::new(ScriptedTextGenerator::new(vec![]));
        let (game, mut receiver) =
            spawn_game_with_settings(GameMode::Chess, settings, generator).await;
        tokio::time::sleep(Duration::from_millis(190)).await;

        let started = Instant::now();
        game.start_round().await.unwrap();
        wait_for(&mut receiver, |snapshot| {
            snapshot.state == GameFsmState::Ended
        })
        .await;

        assert!(started.elapsed() >= Duration::from_millis(180));
    }

    #[tokio::test]
    async fn failed_text_generation_still_scores_the_round() {
        let generator = Arc::new(ScriptedTextGenerator::new(vec![Err(
            Error::TextGeneration("unavailable".to_string()),
        )]));
        let (game, mut receiver) = spawn_game(GameMode::Stop, generator).await;

        game.start_round().await.unwrap();
        game.stop_round().await.unwrap();
        let snapshot = wait_for(&mut receiver, |snapshot| snapshot.history.len() == 1).await;

        assert_eq!(snapshot.state, GameFsmState::Ended);
        assert_eq!(snapshot.history[0].tally, ScoreTally::default());
    }

    #[tokio::test]
    async fn answers_for_a_cancelled_round_do_not_reach_the_next_round() {
        let generator = Arc::new(
            ScriptedTextGenerator::new(vec![Ok(json!({ "animal": "Zorro" }))])
                .with_delay(Duration::from_millis(100)),
        );
        let (game, mut receiver) = spawn_game(GameMode::Stop, generator).await;

        game.start_round().await.unwrap();
        game.stop_round().await.unwrap();
        game.exit_to_menu().await.unwrap();
        game.start_round().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        game.exit_to_menu().await.unwrap();

        let snapshot = wait_for(&mut receiver, |snapshot| {
            snapshot.state == GameFsmState::Menu && snapshot.round.is_none()
        })
        .await;
        assert!(snapshot.history.is_empty());
    }

    #[tokio::test]
    async fn second_player_is_rejected() {
        let generator = Arc::new(ScriptedTextGenerator::new(vec![]));
        let (game, _receiver) = spawn_game(GameMode::Chess, generator).await;

        let result = game.connect_player().await;

        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::PlayerAlreadyConnected(_)))
        ));
    }

    #[tokio::test]
    async fn stop_in_menu_is_reported_to_the_player() {
        let generator = Arc::new(ScriptedTextGenerator::new(vec![]));
        let (game, _receiver) = spawn_game(GameMode::Stop, generator).await;

        let result = game.stop_round().await;

        assert_eq!(
            result,
            Err(Error::Domain(DomainError::InvalidStateForStoppingRound(
                GameFsmState::Menu,
                GameFsmState::Active
            )))
        );
    }

    #[tokio::test]
    async fn inactive_game_is_removed_from_the_factory() {
        let text_generation = TextGenerationSettings::default();
        let game_factory = GameFactoryActor::spawn(
            settings(0),
            text_generation,
            Arc::new(ScriptedTextGenerator::new(vec![])),
        );
        let id = game_factory.create_game(GameMode::Coloring).await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            game_factory.get_game(&id).await.unwrap_err(),
            Error::Domain(DomainError::GameDoesNotExist(id))
        );
    }
}
