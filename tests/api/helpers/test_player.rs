use std::time::Duration;

use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

use super::test_game::{GameState, WsMessageIn, WsMessageOut};

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct TestPlayer {
    pub tx: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
    pub rx: SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl TestPlayer {
    pub async fn receive_text(&mut self) -> Result<String, String> {
        match tokio::time::timeout(RECEIVE_TIMEOUT, self.rx.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => Ok(text),
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) => {
                Err("Websocket closed before expected.".to_string())
            }
            Ok(Some(Ok(message))) => Err(format!("Unexpected websocket message {message:?}")),
            Ok(Some(Err(error))) => Err(format!("Websocket returned an error {error}")),
            Err(_) => Err("No message received in time.".to_string()),
        }
    }

    /// Next server message. Errors come back as their code.
    pub async fn receive_game_state(&mut self) -> Result<GameState, String> {
        let text = self.receive_text().await?;
        match serde_json::from_str(&text) {
            Ok(WsMessageIn::GameState(state)) => Ok(state),
            Ok(WsMessageIn::Error {
                code,
                title,
                detail,
            }) => {
                assert!(!title.is_empty());
                assert!(!detail.is_empty());
                Err(code)
            }
            Err(error) => Err(format!("Could not parse the message. Error: '{error}'.")),
        }
    }

    /// Skips the timer updates until the state matches.
    pub async fn wait_for_game_state(
        &mut self,
        condition: impl Fn(&GameState) -> bool,
    ) -> GameState {
        loop {
            let state = self
                .receive_game_state()
                .await
                .expect("Expected a game state");
            if condition(&state) {
                return state;
            }
        }
    }

    /// Skips the timer updates until an error arrives.
    pub async fn receive_error(&mut self) -> String {
        loop {
            if let Err(code) = self.receive_game_state().await {
                return code;
            }
        }
    }

    pub async fn start_round(&mut self) -> Result<GameState, String> {
        self.send_text_message(WsMessageOut::StartRound).await;
        self.receive_game_state().await
    }

    pub async fn submit_entry(&mut self, category: Option<&str>, value: &str) {
        self.send_text_message(WsMessageOut::SubmitEntry {
            category: category.map(str::to_string),
            value: value.to_string(),
        })
        .await;
    }

    pub async fn stop(&mut self) {
        self.send_text_message(WsMessageOut::Stop).await;
    }

    pub async fn exit_to_menu(&mut self) {
        self.send_text_message(WsMessageOut::ExitToMenu).await;
    }

    pub async fn ping(&mut self) -> String {
        self.send_message(Message::Text("ping".to_string())).await;
        loop {
            let text = self.receive_text().await.expect("Expected a pong");
            if text == "pong" {
                return text;
            }
        }
    }

    pub async fn send_message(&mut self, message: Message) {
        self.tx.send(message).await.expect("Could not send message");
    }

    async fn send_text_message(&mut self, message: WsMessageOut) {
        self.send_message(Message::Text(
            serde_json::to_string(&message).expect("Could not serialize message"),
        ))
        .await;
    }
}
