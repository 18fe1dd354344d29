use thiserror::Error;

use crate::game::game_fsm::GameFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The game does not exist. GameId: '{0}'.")]
    GameDoesNotExist(String),
    #[error("A player is already connected to the game. GameId: '{0}'.")]
    PlayerAlreadyConnected(String),
    #[error("Invalid state for starting a Round. ActualState: '{0:?}'.")]
    InvalidStateForStartingRound(GameFsmState),
    #[error("Invalid state for submitting an Entry. ActualState: '{0:?}', ExpectedState: '{1:?}'.")]
    InvalidStateForSubmission(GameFsmState, GameFsmState),
    #[error("Invalid state for stopping the Round. ActualState: '{0:?}', ExpectedState: '{1:?}'.")]
    InvalidStateForStoppingRound(GameFsmState, GameFsmState),
    #[error("The previous Round is still waiting for the opponent. RoundId: '{0}'.")]
    RoundIsBeingScored(u64),
}
