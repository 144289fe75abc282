//! Multiplayer replication.
//!
//! Clients exchange [`GameMessage`]s through a relay that never interprets
//! game rules. Each client holds a [`Replica`] running its own engine; the
//! relay side is [`RelayRooms`].
//!
//! ```text
//!  roller ──DICE_ROLLED──▶ relay ──▶ others: apply_dice_value(v)
//!  mover  ──MOVE_EXECUTED─▶ relay ──▶ others: execute_move(m)
//!  mover  ──STATE_CHECKPOINT─▶ relay (stored)
//!  rejoin ◀──GAME_START + STATE_SYNC── relay
//! ```

pub mod message;
pub mod relay;
pub mod replica;

pub use message::{GameMessage, MessageKind, Payload};
pub use relay::{Outbound, Recipient, RelayRooms, ROOM_CODE_LENGTH};
pub use replica::{Replica, SessionPhase};
