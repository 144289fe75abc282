//! One client's copy of a networked game.
//!
//! Every client runs the full engine. State-affecting inputs (dice values and
//! chosen moves) are broadcast verbatim and replayed by everyone else through
//! the same pure transitions, so all honest replicas hold identical states.
//!
//! ## Discipline
//!
//! - Inbound messages are applied one at a time in relay order.
//! - Local actions are turn-gated: only the current seat may roll or move.
//! - Remote dice values go through `apply_dice_value`, never a local re-roll.
//! - A pending gift is promoted before a move is computed or replayed.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::board::BoardLayout;
use crate::core::{DiceResult, GameConfig, GamePhase, GameRng, GameState, Move, PlayerColor};
use crate::error::SyncError;
use crate::rules::GameEngine;

use super::message::{GameMessage, MessageKind};

/// Connection lifecycle as seen by one client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    /// Transport not yet open.
    Connecting,
    /// In a room, waiting for the game to start (or for a state sync).
    Lobby,
    /// Playing.
    InGame,
    /// Transport lost. Reconnect and wait for `STATE_SYNC`.
    Disconnected,
}

/// A client's replica of the game plus its session bookkeeping.
#[derive(Clone, Debug)]
pub struct Replica {
    color: PlayerColor,
    name: String,
    is_host: bool,
    layout: Arc<BoardLayout>,
    engine: Option<GameEngine>,
    state: Option<GameState>,
    session: SessionPhase,
    connected: BTreeSet<PlayerColor>,
    last_error: Option<String>,
}

impl Replica {
    /// The hosting client, which owns the configuration.
    pub fn host(
        color: PlayerColor,
        name: impl Into<String>,
        layout: Arc<BoardLayout>,
        config: GameConfig,
    ) -> Result<Self, SyncError> {
        let engine = GameEngine::new(Arc::clone(&layout), config)?;
        let mut replica = Self::new(color, name.into(), true, layout);
        replica.engine = Some(engine);
        Ok(replica)
    }

    /// A joining client. Learns the configuration from `GAME_START`.
    #[must_use]
    pub fn guest(color: PlayerColor, name: impl Into<String>, layout: Arc<BoardLayout>) -> Self {
        Self::new(color, name.into(), false, layout)
    }

    fn new(color: PlayerColor, name: String, is_host: bool, layout: Arc<BoardLayout>) -> Self {
        Self {
            color,
            name,
            is_host,
            layout,
            engine: None,
            state: None,
            session: SessionPhase::Connecting,
            connected: BTreeSet::new(),
            last_error: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.color
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_host(&self) -> bool {
        self.is_host
    }

    #[must_use]
    pub fn session_phase(&self) -> SessionPhase {
        self.session
    }

    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn engine(&self) -> Option<&GameEngine> {
        self.engine.as_ref()
    }

    /// Colors currently connected to the room, in seating order.
    pub fn connected_colors(&self) -> impl Iterator<Item = PlayerColor> + '_ {
        self.connected.iter().copied()
    }

    /// Last `ERROR` received from the relay.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while this client is the current seat of a running game.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.session == SessionPhase::InGame
            && self
                .state
                .as_ref()
                .is_some_and(|s| !s.is_game_over() && s.current_color() == self.color)
    }

    /// Moves available to this client right now. Empty unless it is this
    /// client's turn to move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        let (Some(engine), Some(state)) = (&self.engine, &self.state) else {
            return Vec::new();
        };
        if !self.is_my_turn() || state.phase != GamePhase::WaitingForMove {
            return Vec::new();
        }
        engine.legal_moves(&engine.apply_gifted_dice(state))
    }

    /// The move to play without asking, when there is exactly one.
    #[must_use]
    pub fn forced_move(&self) -> Option<Move> {
        let mut moves = self.legal_moves();
        if moves.len() == 1 {
            moves.pop()
        } else {
            None
        }
    }

    // === Connection ===

    /// The transport is open and the client sits in its room.
    pub fn connect(&mut self) {
        if self.session != SessionPhase::InGame {
            self.session = SessionPhase::Lobby;
        }
        self.connected.insert(self.color);
    }

    /// The transport dropped. Local state is kept but no longer trusted;
    /// a `STATE_SYNC` after reconnecting replaces it.
    pub fn disconnect(&mut self) {
        info!("{} disconnected", self.color);
        self.session = SessionPhase::Disconnected;
        self.connected.clear();
    }

    // === Local actions ===

    /// Host only: start the game and announce the configuration.
    pub fn start_game(&mut self) -> Result<Vec<GameMessage>, SyncError> {
        if !self.is_host {
            return Err(SyncError::NotHost);
        }
        self.ensure_connected()?;
        let engine = self.engine.as_ref().ok_or(SyncError::GameNotStarted)?;
        let state = engine.create_initial_state();
        let outbound = vec![
            GameMessage::game_start(engine.config().clone()).with_color(self.color),
            GameMessage::state_checkpoint(state.clone()).with_color(self.color),
        ];
        info!("{} starts a {}-player game", self.color, state.player_count());
        self.state = Some(state);
        self.session = SessionPhase::InGame;
        self.connected.insert(self.color);
        Ok(outbound)
    }

    /// Roll locally and broadcast the value.
    pub fn roll_dice(&mut self, rng: &mut GameRng) -> Result<Vec<GameMessage>, SyncError> {
        self.submit_dice_value(rng.roll_die())
    }

    /// Apply a value rolled on this client (e.g. by a physical die) and
    /// broadcast it, followed by a checkpoint for the relay.
    pub fn submit_dice_value(&mut self, value: u8) -> Result<Vec<GameMessage>, SyncError> {
        if !DiceResult::is_valid_value(value) {
            return Err(SyncError::InvalidDiceValue(value));
        }
        self.ensure_in_game()?;
        let (engine, state) = self.game()?;
        if state.current_color() != self.color {
            return Err(SyncError::NotYourTurn(self.color));
        }
        if state.phase != GamePhase::WaitingForRoll {
            return Err(SyncError::WrongPhase(state.phase));
        }

        let next = engine.apply_dice_value(state, value);
        let outbound = vec![
            GameMessage::dice_rolled(value).with_color(self.color),
            GameMessage::state_checkpoint(next.clone()).with_color(self.color),
        ];
        self.state = Some(next);
        Ok(outbound)
    }

    /// Execute one of [`legal_moves`](Self::legal_moves) and broadcast it,
    /// followed by a checkpoint for the relay.
    pub fn choose_move(&mut self, mv: &Move) -> Result<Vec<GameMessage>, SyncError> {
        self.ensure_in_game()?;
        let (engine, state) = self.game()?;
        if state.current_color() != self.color {
            return Err(SyncError::NotYourTurn(self.color));
        }
        let ready = engine.apply_gifted_dice(state);
        if !engine.is_legal_move(&ready, mv) {
            return Err(SyncError::IllegalMove);
        }

        let next = engine.execute_move(&ready, mv);
        let mut outbound = vec![
            GameMessage::move_executed(mv.clone()).with_color(self.color),
            GameMessage::state_checkpoint(next.clone()).with_color(self.color),
        ];
        if let Some(winner) = next.winner {
            outbound.push(GameMessage::game_over(winner));
        }
        self.state = Some(next);
        Ok(outbound)
    }

    // === Inbound ===

    /// Decode and apply a text frame.
    pub fn receive_json(&mut self, text: &str) -> Result<(), SyncError> {
        let message = GameMessage::from_json(text).map_err(|e| {
            warn!("{} dropped malformed frame: {e}", self.color);
            e
        })?;
        self.handle(&message)
    }

    /// Decode and apply a binary frame.
    pub fn receive_bytes(&mut self, bytes: &[u8]) -> Result<(), SyncError> {
        let message = GameMessage::from_bytes(bytes).map_err(|e| {
            warn!("{} dropped malformed frame: {e}", self.color);
            e
        })?;
        self.handle(&message)
    }

    /// Apply one inbound message. On error the replica is unchanged.
    pub fn handle(&mut self, message: &GameMessage) -> Result<(), SyncError> {
        debug!("{} handles {:?}", self.color, message.kind);
        match message.kind {
            MessageKind::PlayerJoined => {
                let color = message
                    .player_color
                    .ok_or(SyncError::PayloadMismatch(message.kind))?;
                self.connected.insert(color);
            }
            MessageKind::PlayerLeft => {
                let color = message
                    .player_color
                    .ok_or(SyncError::PayloadMismatch(message.kind))?;
                self.connected.remove(&color);
            }
            MessageKind::GameStart => {
                let config = message.config_payload()?.clone();
                let engine = GameEngine::new(Arc::clone(&self.layout), config)?;
                self.state = Some(engine.create_initial_state());
                self.engine = Some(engine);
                self.session = SessionPhase::InGame;
                info!("{} joined a started game", self.color);
            }
            MessageKind::DiceRolled => {
                let value = message.dice_value()?;
                let (engine, state) = self.game()?;
                check_author(message, state)?;
                if !DiceResult::is_valid_value(value) {
                    return Err(SyncError::InvalidDiceValue(value));
                }
                if state.phase != GamePhase::WaitingForRoll {
                    return Err(SyncError::WrongPhase(state.phase));
                }
                let next = engine.apply_dice_value(state, value);
                self.state = Some(next);
            }
            MessageKind::MoveExecuted => {
                let mv = message.move_payload()?;
                let (engine, state) = self.game()?;
                check_author(message, state)?;
                let ready = engine.apply_gifted_dice(state);
                if !engine.is_legal_move(&ready, mv) {
                    return Err(SyncError::IllegalMove);
                }
                let next = engine.execute_move(&ready, mv);
                self.state = Some(next);
            }
            MessageKind::GameOver => {
                let winner = self.state.as_ref().and_then(|s| s.winner);
                if winner != message.player_color {
                    warn!(
                        "{} got game over for {:?} but holds winner {:?}",
                        self.color, message.player_color, winner
                    );
                }
            }
            MessageKind::StateCheckpoint => {}
            MessageKind::StateSync => {
                let state = message.state_payload()?.clone();
                if self.engine.is_none() {
                    return Err(SyncError::GameNotStarted);
                }
                state.check_invariants().map_err(SyncError::InvalidState)?;
                info!("{} resynced at roll {}", self.color, state.roll_count);
                self.state = Some(state);
                self.session = SessionPhase::InGame;
                self.connected.insert(self.color);
            }
            MessageKind::Error => {
                let text = message.error_message().unwrap_or("unknown error").to_string();
                warn!("{} received error: {text}", self.color);
                self.last_error = Some(text);
            }
        }
        Ok(())
    }

    fn ensure_connected(&self) -> Result<(), SyncError> {
        match self.session {
            SessionPhase::Connecting | SessionPhase::Disconnected => Err(SyncError::Disconnected),
            SessionPhase::Lobby | SessionPhase::InGame => Ok(()),
        }
    }

    /// Game actions need a live, synced game. A reconnected replica sits in
    /// `Lobby` on stale state until `STATE_SYNC` arrives.
    fn ensure_in_game(&self) -> Result<(), SyncError> {
        match self.session {
            SessionPhase::Connecting | SessionPhase::Disconnected => Err(SyncError::Disconnected),
            SessionPhase::Lobby => Err(SyncError::AwaitingSync),
            SessionPhase::InGame => Ok(()),
        }
    }

    fn game(&self) -> Result<(&GameEngine, &GameState), SyncError> {
        match (&self.engine, &self.state) {
            (Some(engine), Some(state)) => Ok((engine, state)),
            _ => Err(SyncError::GameNotStarted),
        }
    }
}

/// A game message must come from the seat whose turn it is.
fn check_author(message: &GameMessage, state: &GameState) -> Result<(), SyncError> {
    match message.player_color {
        Some(author) if author != state.current_color() => Err(SyncError::NotYourTurn(author)),
        _ => Ok(()),
    }
}
