use std::net::SocketAddr;

use futures_util::StreamExt;
use serde::Deserialize;
use sofa_games::config::Config;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::test_game::TestGame;
use super::test_player::TestPlayer;

pub const STOP_ROUND_TICKS: u32 = 250;
pub const WORDS_ROUND_TICKS: u32 = 3;

pub struct TestApp {
    pub base_address: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        // Port 0 lets the OS pick a free port, so every test runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();
        std::env::set_var("ENVIRONMENT", "dev");
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game.tick_interval_millis = 20;
            config.game.stop_round_seconds = STOP_ROUND_TICKS;
            config.game.words_round_seconds = WORDS_ROUND_TICKS;
            config.game.board_turn_seconds = STOP_ROUND_TICKS;
            config.game.player_ping_timeout_millis = 1500;
            config.text_generation.url = String::default();
            config.preferences.dark_mode = true;
            config
        };

        let _ = tokio::spawn(sofa_games::startup::create_web_server(config, listener));

        TestApp {
            base_address: format!("127.0.0.1:{}", address.port()),
        }
    }

    pub async fn post_game(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("http://{}/game", self.base_address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute CreateGame request.")
    }

    pub async fn create_game(mode: &str) -> TestGame {
        let app = TestApp::spawn_app().await;

        let response = app.post_game(serde_json::json!({ "mode": mode })).await;
        assert!(response.status().is_success());

        let game_created_response: GameCreatedResponse = response
            .json()
            .await
            .expect("Failed to parse GameCreatedResponse.");
        assert_eq!(game_created_response.id.len(), 5);

        TestGame {
            app,
            id: game_created_response.id,
        }
    }

    pub async fn open_game_websocket(
        &self,
        game_id: &str,
    ) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>, String> {
        tokio_tungstenite::connect_async(format!("ws://{}/game/{game_id}/ws", self.base_address))
            .await
            .map(|websocket_stream| websocket_stream.0)
            .map_err(|error| format!("WebSocket could not be created. Error: '{error}'."))
    }

    pub async fn connect_player(&self, game_id: &str) -> TestPlayer {
        let (tx, rx) = self
            .open_game_websocket(game_id)
            .await
            .expect("Could not open the websocket")
            .split();
        TestPlayer { tx, rx }
    }
}

#[derive(Deserialize)]
struct GameCreatedResponse {
    id: String,
}
