pub mod message;

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;

use crate::error::domain_error::DomainError;
use crate::error::Error;

use self::message::{WsMessageIn, WsMessageOut};

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    if let Err(send_error) = send_message(websocket, &error_to_ws_error(error)).await {
        log::warn!("Could not send the error to the player. Error: '{error}', SendError: '{send_error}'.");
    }
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::info!("Could not close the WebSocket, it may already be closed. Error: '{error}'.")
    }
}

pub fn parse_message(message: &str) -> Result<WsMessageIn, Error> {
    serde_json::from_str(message)
        .map_err(|error| Error::UnprocessableMessage(message.to_string(), error.to_string()))
}

pub async fn send_message<T>(websocket: &mut WebSocket, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let message = serde_json::to_string(value).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    send_message_string(websocket, &message).await
}

pub async fn send_message_string(websocket: &mut WebSocket, message: &str) -> Result<(), Error> {
    websocket
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

fn error_to_ws_error(error: &Error) -> WsMessageOut {
    let (code, title) = match error {
        Error::Domain(domain_error) => match domain_error {
            DomainError::GameDoesNotExist(_) => ("GAME_DOES_NOT_EXIST", "The game does not exist"),
            DomainError::PlayerAlreadyConnected(_) => (
                "PLAYER_ALREADY_CONNECTED",
                "Another player is already connected to the game",
            ),
            DomainError::InvalidStateForStartingRound(_) => (
                "INVALID_STATE_FOR_STARTING_ROUND",
                "A round can't be started now",
            ),
            DomainError::InvalidStateForSubmission(_, _) => (
                "INVALID_STATE_FOR_SUBMISSION",
                "Entries are only accepted while the round is active",
            ),
            DomainError::InvalidStateForStoppingRound(_, _) => (
                "INVALID_STATE_FOR_STOPPING_ROUND",
                "There is no active round to stop",
            ),
            DomainError::RoundIsBeingScored(_) => (
                "ROUND_IS_BEING_SCORED",
                "The previous round is still being scored",
            ),
        },
        Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
        Error::UnprocessableMessage(_, _) => {
            ("UNPROCESSABLE_WEBSOCKET_MESSAGE", "Unprocessable message")
        }
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The player websocket is closed"),
        Error::TextGeneration(_) => (
            "TEXT_GENERATION_FAILED",
            "The text generation service failed",
        ),
    };
    WsMessageOut::Error {
        code: code.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
