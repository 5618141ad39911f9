//! Process-wide registry of game rooms.
//!
//! `GameDirectory` maps room ids to games and serializes operations per room.

mod directory;

pub use directory::{GameDirectory, GameHandle, SeatVacated};
