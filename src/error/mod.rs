pub mod domain_error;

use thiserror::Error;

use self::domain_error::DomainError;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("Domain Error. {0}")]
    Domain(DomainError),
    #[error("Internal Error. Error: '{0}'.")]
    Internal(String),
    #[error("Received a bad formatted message. Message: '{1}', Error: '{0}'.")]
    UnprocessableMessage(String, String),
    #[error("The websocket with the player is closed. Reason: '{0}'.")]
    WebsocketClosed(String),
    #[error("The text generation service failed. Error: '{0}'.")]
    TextGeneration(String),
}

impl Error {
    pub fn log_and_create_internal(message: &str) -> Error {
        log::error!("{message}");
        Error::Internal(message.to_string())
    }

    /// Errors that leave the player connection unusable.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Internal(_) | Error::WebsocketClosed(_) => true,
            Error::Domain(_) | Error::UnprocessableMessage(_, _) | Error::TextGeneration(_) => {
                false
            }
        }
    }
}

impl From<DomainError> for Error {
    fn from(error: DomainError) -> Self {
        Error::Domain(error)
    }
}
