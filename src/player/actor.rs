use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use tokio::select;
use tokio::time::error::Elapsed;
use tokio::time::timeout;

use crate::error::Error;
use crate::game::actor::GameWideEvent;
use crate::game::actor_client::{GameClient, GameWideEventReceiver};
use crate::metrics::CONNECTED_PLAYERS;
use crate::websocket::message::{WsMessageIn, WsMessageOut};
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};

pub struct PlayerActor {
    game_id: String,
    game: GameClient,
    game_wide_event_receiver: GameWideEventReceiver,
    websocket: WebSocket,
    inactivity_timeout: Duration,
}

impl PlayerActor {
    pub async fn create(
        game_id: String,
        game: GameClient,
        mut websocket: WebSocket,
        inactivity_timeout: Duration,
    ) {
        match game.connect_player().await {
            Ok(game_wide_event_receiver) => {
                PlayerActor {
                    game_id,
                    game,
                    game_wide_event_receiver,
                    websocket,
                    inactivity_timeout,
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_PLAYERS.inc();
        log::info!("Player connected. GameId: '{}'.", self.game_id);

        loop {
            select! {
                game_wide_message = self.game_wide_event_receiver.next() => {
                    if let Err(error) = self.receive_game_wide_message(game_wide_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.is_fatal() {
                            break;
                        }
                    }
                },
                websocket_message = timeout(self.inactivity_timeout, self.websocket.recv()) => {
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.is_fatal() {
                            break;
                        }
                    }
                },
            }
        }

        let _ = self.game.disconnect_player().await;
        close(self.websocket).await;
        CONNECTED_PLAYERS.dec();
    }

    async fn receive_game_wide_message(
        &mut self,
        game_wide_message: Result<GameWideEvent, Error>,
    ) -> Result<(), Error> {
        match game_wide_message? {
            GameWideEvent::GameState(snapshot) => {
                send_message(&mut self.websocket, &WsMessageOut::from(*snapshot)).await
            }
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Result<Option<Result<Message, axum::Error>>, Elapsed>,
    ) -> Result<(), Error> {
        match websocket_message {
            Ok(Some(Ok(Message::Text(txt)))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => match parse_message(message)? {
                    WsMessageIn::StartRound => self.game.start_round().await,
                    WsMessageIn::SubmitEntry { category, value } => {
                        self.game.submit_entry(category, &value).await
                    }
                    WsMessageIn::Stop => self.game.stop_round().await,
                    WsMessageIn::ExitToMenu => self.game.exit_to_menu().await,
                },
            },
            // browser said "close"
            Ok(Some(Ok(Message::Close(_)))) => {
                self.log_connection_lost_with_player("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            Ok(None) => {
                self.log_connection_lost_with_player("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            // timeout without receiving anything from player
            Err(_) => {
                self.log_connection_lost_with_player(
                    "connection timed out; missing 'ping' messages",
                );
                Err(Error::WebsocketClosed(
                    "connection timed out; missing 'ping' messages".to_string(),
                ))
            }
            Ok(Some(Err(error))) => Err(Error::UnprocessableMessage(
                "Message cannot be loaded".to_string(),
                error.to_string(),
            )),
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => Ok(()),
            Ok(Some(Ok(_))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Unsupported message type".to_string(),
            )),
        }
    }

    fn log_connection_lost_with_player(&self, reason: &str) {
        log::info!(
            "Connection with the player of game {} lost due to: {}. Stopping player actor.",
            &self.game_id,
            reason,
        );
    }
}
