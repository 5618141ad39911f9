//! Core engine types: stones, players, ids, RNG, configuration, errors.
//!
//! Everything here is a value type with no knowledge of rooms or turns.

pub mod stone;
pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use stone::{Stone, StoneColor, MAX_NUMBER, MIN_NUMBER, JOKER_NUMBER};
pub use entity::{MeldId, RoomId};
pub use player::{Player, PlayerId, Seat};
pub use rng::{GameRng, GameRngState};
pub use config::{HugoConfig, DECK_SIZE};
pub use error::{GameError, GameResult};
