use std::path::PathBuf;

use crate::core::{GamePhase, PlayerColor};
use crate::sync::MessageKind;

/// Errors that can occur when building or loading a `GameConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("a game needs 2-4 players, got {0}")]
    PlayerCount(usize),

    #[error("color {0} is used by more than one player")]
    DuplicateColor(PlayerColor),

    #[error("invalid config: {0}")]
    Validation(String),
}

/// Errors surfaced by the replication layer.
///
/// None of these reach the engine: a failed decode drops the message, and a
/// rejected local action leaves the replica's state untouched.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("{0:?} message carries no payload or the wrong payload")]
    PayloadMismatch(MessageKind),

    #[error("config rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("no game is running")]
    GameNotStarted,

    #[error("not connected to a room")]
    Disconnected,

    #[error("reconnected; waiting for a state sync")]
    AwaitingSync,

    #[error("only the host can start the game")]
    NotHost,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerColor),

    #[error("action not allowed in phase {0:?}")]
    WrongPhase(GamePhase),

    #[error("dice value {0} is outside 1..=6")]
    InvalidDiceValue(u8),

    #[error("move is not in the current legal set")]
    IllegalMove,

    #[error("received state violates an invariant: {0}")]
    InvalidState(String),

    #[error("unknown room '{0}'")]
    UnknownRoom(String),

    #[error("color {color} is already taken in room '{room}'")]
    ColorTaken { room: String, color: PlayerColor },

    #[error("color {color} has not joined room '{room}'")]
    NotInRoom { room: String, color: PlayerColor },

    #[error("clients may not send {0:?} messages")]
    ServerOnly(MessageKind),
}
