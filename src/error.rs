use serde_json::Error as JSON_ERROR;
use std::io::Error as IO_ERROR;
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::error::Elapsed;
use tokio_tungstenite::tungstenite::Error as WS_ERROR;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("Relay query timed out: {0}")]
    TokioElapsedError(#[from] Elapsed),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    WS(#[from] WS_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid payload in event {id}: {reason}")]
    PayloadParse { id: String, reason: String },

    #[error("Relay error ({relay}): {message}")]
    Relay { relay: String, message: String },

    #[error("Relay closed subscription ({relay}): {message}")]
    RelayClosed { relay: String, message: String },

    #[error("Invalid option {option}")]
    InvalidOption { option: String },

    #[error("Task message error: {0}")]
    TaskError(String),
}
