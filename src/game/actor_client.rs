use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameCommand, GameEvent, GameWideEvent};

#[derive(Clone, Debug)]
pub struct GameClient {
    pub(super) game_tx: Sender<GameCommand>,
}

impl GameClient {
    pub async fn connect_player(&self) -> Result<GameWideEventReceiver, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.game_tx
            .send(GameCommand::ConnectPlayer { response_tx: tx })
            .await
            // The game is still listed in the GameFactory but its actor already stopped.
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The Game is not alive. Can't connect the Player. Error: '{error}'"
                ))
            })?;

        match rx.await {
            Ok(GameEvent::PlayerConnected { broadcast_rx }) => {
                Ok(GameWideEventReceiver { broadcast_rx })
            }
            Ok(GameEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Player sent a GameCommand::ConnectPlayer to Game, but Game channel died.",
            )),
        }
    }

    pub async fn disconnect_player(&self) -> Result<(), Error> {
        self.game_tx
            .send(GameCommand::DisconnectPlayer)
            .await
            .map_err(|error| Error::log_and_create_internal(&format!("Tried to send GameCommand::DisconnectPlayer but GameActor is not listening. Error: {error}.")))
    }

    pub async fn start_round(&self) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::StartRound { response_tx },
            "StartRound",
        )
        .await
    }

    pub async fn submit_entry(&self, category: Option<String>, value: &str) -> Result<(), Error> {
        let value = value.to_string();
        self.request(
            |response_tx| GameCommand::SubmitEntry {
                category,
                value,
                response_tx,
            },
            "SubmitEntry",
        )
        .await
    }

    pub async fn stop_round(&self) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::StopRound { response_tx },
            "StopRound",
        )
        .await
    }

    pub async fn exit_to_menu(&self) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::ExitToMenu { response_tx },
            "ExitToMenu",
        )
        .await
    }

    async fn request(
        &self,
        command: impl FnOnce(OneshotSender<GameEvent>) -> GameCommand,
        command_name: &str,
    ) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.game_tx.send(command(tx)).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send GameCommand::{command_name} but GameActor is not listening. Error: {error}."
            ))
        })?;

        match rx.await {
            Ok(GameEvent::Ok) => Ok(()),
            Ok(GameEvent::Error { error }) => Err(error),
            Ok(unexpected_event) => Err(Error::log_and_create_internal(&format!(
                "Received an unexpected GameEvent for GameCommand::{command_name}. GameEvent: '{unexpected_event}'."
            ))),
            Err(_) => Err(Error::log_and_create_internal(&format!(
                "Sent a GameCommand::{command_name} to Game, but Game channel died."
            ))),
        }
    }
}

pub struct GameWideEventReceiver {
    broadcast_rx: broadcast::Receiver<GameWideEvent>,
}

impl GameWideEventReceiver {
    pub async fn next(&mut self) -> Result<GameWideEvent, Error> {
        self.broadcast_rx.recv().await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The broadcast channel with the Game has been closed. Error: {error}."
            ))
        })
    }
}
