//! Engine errors.
//!
//! Every error is recoverable by the caller: an operation that returns
//! `Err` has not mutated the game.

use thiserror::Error;

use super::entity::{MeldId, RoomId};
use super::player::{PlayerId, Seat};
use super::stone::Stone;

/// Result alias used across the engine.
pub type GameResult<T> = Result<T, GameError>;

/// Errors reported by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game not found for room {0}")]
    GameNotFound(RoomId),

    #[error("room {0} already has a game")]
    RoomExists(RoomId),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("the deck is empty")]
    DeckEmpty,

    #[error("{0} is not in the player's hand")]
    StoneNotInHand(Stone),

    #[error("meld value {value} is below the opening threshold {required}")]
    MeldTooSmall { value: u32, required: u32 },

    #[error("{0} not found")]
    MeldNotFound(MeldId),

    #[error("{meld} cannot accept {stone}")]
    CannotAccept { meld: MeldId, stone: Stone },

    #[error("{0} is already taken")]
    SeatConflict(Seat),

    #[error("player {0} is not seated")]
    PlayerNotFound(PlayerId),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Shorthand for `InvalidState`.
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }
}
