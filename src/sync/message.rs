//! Wire messages and their codecs.
//!
//! Every frame is a [`GameMessage`]: a kind, optional author fields, and an
//! optional payload. The same schema encodes as JSON (text frames) and as
//! bincode (binary frames).

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameState, Move, PlayerColor};
use crate::error::SyncError;

/// Message discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    /// Host to all: the configuration to start from.
    GameStart,
    /// Roller to all: the value to apply.
    DiceRolled,
    /// Mover to all: the move to replay.
    MoveExecuted,
    /// Any to all: the game has ended.
    GameOver,
    /// Mover to relay only: latest state, kept for reconnection.
    StateCheckpoint,
    /// Relay to all: a seat connected.
    PlayerJoined,
    /// Relay to all: a seat disconnected.
    PlayerLeft,
    /// Relay to one client: replace local state.
    StateSync,
    /// Relay to one client: a rejected request.
    Error,
}

impl MessageKind {
    /// Kinds the relay forwards to the rest of the room.
    #[must_use]
    pub fn is_relayed(self) -> bool {
        matches!(
            self,
            Self::GameStart | Self::DiceRolled | Self::MoveExecuted | Self::GameOver
        )
    }

    /// Kinds only the relay may originate.
    #[must_use]
    pub fn is_server_only(self) -> bool {
        matches!(
            self,
            Self::PlayerJoined | Self::PlayerLeft | Self::StateSync | Self::Error
        )
    }
}

/// Message body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Dice(u8),
    Move(Move),
    Config(GameConfig),
    State(GameState),
    Error(String),
}

/// One protocol frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    pub kind: MessageKind,
    /// Author of a game message, or subject of a membership message.
    #[serde(default)]
    pub player_color: Option<PlayerColor>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub payload: Option<Payload>,
}

impl GameMessage {
    #[must_use]
    pub fn new(kind: MessageKind, payload: Option<Payload>) -> Self {
        Self {
            kind,
            player_color: None,
            player_name: None,
            payload,
        }
    }

    /// Set the author color.
    #[must_use]
    pub fn with_color(mut self, color: PlayerColor) -> Self {
        self.player_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn game_start(config: GameConfig) -> Self {
        Self::new(MessageKind::GameStart, Some(Payload::Config(config)))
    }

    #[must_use]
    pub fn dice_rolled(value: u8) -> Self {
        Self::new(MessageKind::DiceRolled, Some(Payload::Dice(value)))
    }

    #[must_use]
    pub fn move_executed(mv: Move) -> Self {
        Self::new(MessageKind::MoveExecuted, Some(Payload::Move(mv)))
    }

    #[must_use]
    pub fn game_over(winner: PlayerColor) -> Self {
        Self::new(MessageKind::GameOver, None).with_color(winner)
    }

    #[must_use]
    pub fn state_checkpoint(state: GameState) -> Self {
        Self::new(MessageKind::StateCheckpoint, Some(Payload::State(state)))
    }

    #[must_use]
    pub fn state_sync(state: GameState) -> Self {
        Self::new(MessageKind::StateSync, Some(Payload::State(state)))
    }

    #[must_use]
    pub fn player_joined(color: PlayerColor, name: impl Into<String>) -> Self {
        Self::new(MessageKind::PlayerJoined, None)
            .with_color(color)
            .with_name(name)
    }

    #[must_use]
    pub fn player_left(color: PlayerColor) -> Self {
        Self::new(MessageKind::PlayerLeft, None).with_color(color)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, Some(Payload::Error(message.into())))
    }

    // === Payload access ===

    pub fn dice_value(&self) -> Result<u8, SyncError> {
        match self.payload {
            Some(Payload::Dice(value)) => Ok(value),
            _ => Err(SyncError::PayloadMismatch(self.kind)),
        }
    }

    pub fn move_payload(&self) -> Result<&Move, SyncError> {
        match &self.payload {
            Some(Payload::Move(mv)) => Ok(mv),
            _ => Err(SyncError::PayloadMismatch(self.kind)),
        }
    }

    pub fn config_payload(&self) -> Result<&GameConfig, SyncError> {
        match &self.payload {
            Some(Payload::Config(config)) => Ok(config),
            _ => Err(SyncError::PayloadMismatch(self.kind)),
        }
    }

    pub fn state_payload(&self) -> Result<&GameState, SyncError> {
        match &self.payload {
            Some(Payload::State(state)) => Ok(state),
            _ => Err(SyncError::PayloadMismatch(self.kind)),
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Error(message)) => Some(message),
            _ => None,
        }
    }

    // === Codec ===

    pub fn to_json(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SyncError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SyncError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
