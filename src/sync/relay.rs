//! Server-side room bookkeeping.
//!
//! The relay forwards game messages between the members of a room without
//! interpreting them. It keeps exactly two things per room beyond membership:
//! the configuration from the last `GAME_START` and the latest
//! `STATE_CHECKPOINT`, so a client that (re)joins mid-game can be brought up
//! to date with `GAME_START` + `STATE_SYNC` instead of a full replay.
//!
//! Rejected requests are answered with an `ERROR` to the sender only.

use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::core::{GameConfig, GameRng, GameState, PlayerColor};
use crate::error::SyncError;

use super::message::{GameMessage, MessageKind};

/// Characters used in room codes. No 0/O or 1/I.
const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const ROOM_CODE_LENGTH: usize = 6;

/// Who receives an outbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recipient {
    All,
    AllExcept(PlayerColor),
    Only(PlayerColor),
}

impl Recipient {
    #[must_use]
    pub fn includes(self, color: PlayerColor) -> bool {
        match self {
            Recipient::All => true,
            Recipient::AllExcept(excluded) => excluded != color,
            Recipient::Only(target) => target == color,
        }
    }
}

/// A message the transport must deliver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outbound {
    pub to: Recipient,
    pub message: GameMessage,
}

impl Outbound {
    fn new(to: Recipient, message: GameMessage) -> Self {
        Self { to, message }
    }
}

#[derive(Clone, Debug)]
struct Member {
    color: PlayerColor,
    name: String,
}

#[derive(Clone, Debug, Default)]
struct Room {
    members: Vec<Member>,
    config: Option<GameConfig>,
    checkpoint: Option<GameState>,
}

impl Room {
    fn has_member(&self, color: PlayerColor) -> bool {
        self.members.iter().any(|m| m.color == color)
    }
}

/// All rooms served by one relay.
#[derive(Clone, Debug, Default)]
pub struct RelayRooms {
    rooms: FxHashMap<String, Room>,
}

impl RelayRooms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a room under a fresh random code and return the code.
    pub fn create_room(&mut self, rng: &mut GameRng) -> String {
        loop {
            let code: String = (0..ROOM_CODE_LENGTH)
                .map(|_| {
                    let i = rng.gen_range_usize(0..ROOM_CODE_ALPHABET.len());
                    char::from(ROOM_CODE_ALPHABET[i])
                })
                .collect();
            if self.open_room(&code) {
                return code;
            }
        }
    }

    /// Open a room under `code`. False if it already exists.
    pub fn open_room(&mut self, code: &str) -> bool {
        let code = normalize(code);
        if self.rooms.contains_key(&code) {
            return false;
        }
        info!("opened room {code}");
        self.rooms.insert(code, Room::default());
        true
    }

    /// Close a room and forget everything stored for it.
    pub fn close_room(&mut self, code: &str) -> bool {
        self.rooms.remove(&normalize(code)).is_some()
    }

    #[must_use]
    pub fn has_room(&self, code: &str) -> bool {
        self.rooms.contains_key(&normalize(code))
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Members of a room in join order.
    #[must_use]
    pub fn members(&self, code: &str) -> Option<Vec<PlayerColor>> {
        self.rooms
            .get(&normalize(code))
            .map(|room| room.members.iter().map(|m| m.color).collect())
    }

    /// Latest checkpoint stored for a room.
    #[must_use]
    pub fn checkpoint(&self, code: &str) -> Option<&GameState> {
        self.rooms.get(&normalize(code))?.checkpoint.as_ref()
    }

    /// A client connected to `code` as `color`.
    ///
    /// Everyone hears `PLAYER_JOINED`; the joiner also hears about every
    /// existing member and, if a game is running, receives `GAME_START` and
    /// the latest `STATE_SYNC`.
    pub fn join(&mut self, code: &str, color: PlayerColor, name: &str) -> Vec<Outbound> {
        self.try_join(code, color, name)
            .unwrap_or_else(|e| reject(color, &e))
    }

    /// A client disconnected.
    pub fn leave(&mut self, code: &str, color: PlayerColor) -> Vec<Outbound> {
        let Some(room) = self.rooms.get_mut(&normalize(code)) else {
            return Vec::new();
        };
        let before = room.members.len();
        room.members.retain(|m| m.color != color);
        if room.members.len() == before {
            return Vec::new();
        }
        info!("{color} left room {}", normalize(code));
        vec![Outbound::new(Recipient::All, GameMessage::player_left(color))]
    }

    /// Route a message sent by `from` in room `code`.
    pub fn route(&mut self, code: &str, from: PlayerColor, message: GameMessage) -> Vec<Outbound> {
        self.try_route(code, from, message)
            .unwrap_or_else(|e| reject(from, &e))
    }

    /// Decode a text frame from `from` and route it. Malformed frames are
    /// answered with an error.
    pub fn route_json(&mut self, code: &str, from: PlayerColor, text: &str) -> Vec<Outbound> {
        match GameMessage::from_json(text) {
            Ok(message) => self.route(code, from, message),
            Err(e) => {
                warn!("dropping malformed frame from {from}: {e}");
                reject(from, &e)
            }
        }
    }

    fn try_join(
        &mut self,
        code: &str,
        color: PlayerColor,
        name: &str,
    ) -> Result<Vec<Outbound>, SyncError> {
        let code = normalize(code);
        let room = self
            .rooms
            .get_mut(&code)
            .ok_or_else(|| SyncError::UnknownRoom(code.clone()))?;
        if room.has_member(color) {
            return Err(SyncError::ColorTaken { room: code, color });
        }

        let mut out = vec![Outbound::new(
            Recipient::All,
            GameMessage::player_joined(color, name),
        )];
        for member in &room.members {
            out.push(Outbound::new(
                Recipient::Only(color),
                GameMessage::player_joined(member.color, member.name.as_str()),
            ));
        }
        if let Some(config) = &room.config {
            out.push(Outbound::new(
                Recipient::Only(color),
                GameMessage::game_start(config.clone()),
            ));
            if let Some(state) = &room.checkpoint {
                out.push(Outbound::new(
                    Recipient::Only(color),
                    GameMessage::state_sync(state.clone()),
                ));
            }
        }

        room.members.push(Member {
            color,
            name: name.to_string(),
        });
        info!("{color} joined room {code}");
        Ok(out)
    }

    fn try_route(
        &mut self,
        code: &str,
        from: PlayerColor,
        mut message: GameMessage,
    ) -> Result<Vec<Outbound>, SyncError> {
        let code = normalize(code);
        let room = self
            .rooms
            .get_mut(&code)
            .ok_or_else(|| SyncError::UnknownRoom(code.clone()))?;
        if !room.has_member(from) {
            return Err(SyncError::NotInRoom { room: code, color: from });
        }
        if message.kind.is_server_only() {
            return Err(SyncError::ServerOnly(message.kind));
        }

        match message.kind {
            MessageKind::StateCheckpoint => {
                room.checkpoint = Some(message.state_payload()?.clone());
                debug!("stored checkpoint for room {code}");
                return Ok(Vec::new());
            }
            MessageKind::GameStart => {
                room.config = Some(message.config_payload()?.clone());
                room.checkpoint = None;
                info!("game started in room {code}");
            }
            MessageKind::GameOver => {
                info!("game over in room {code}");
            }
            _ => {}
        }

        message.player_color = Some(from);
        Ok(vec![Outbound::new(Recipient::AllExcept(from), message)])
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn reject(to: PlayerColor, error: &SyncError) -> Vec<Outbound> {
    warn!("rejecting request from {to}: {error}");
    vec![Outbound::new(
        Recipient::Only(to),
        GameMessage::error(error.to_string()),
    )]
}
