use std::sync::Arc;

use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::game::mode::GameMode;
use crate::player::actor::PlayerActor;
use crate::routes::AppState;
use crate::websocket::{close, send_error};

#[derive(Deserialize)]
pub struct CreateGameRequest {
    mode: GameMode,
}

#[derive(Serialize)]
pub struct CreateGameResponse {
    id: String,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGameRequest>,
) -> Response {
    match state.game_factory.create_game(request.mode).await {
        Ok(id) => (StatusCode::OK, Json(CreateGameResponse { id })).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn connect_player_to_websocket(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |mut websocket| async move {
        match state.game_factory.get_game(&game_id).await {
            Ok(game) => {
                PlayerActor::create(game_id, game, websocket, state.player_ping_timeout).await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    })
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::Domain(_) | Error::UnprocessableMessage(_, _) => StatusCode::BAD_REQUEST,
            Error::Internal(_) | Error::WebsocketClosed(_) | Error::TextGeneration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
