//! The game session state machine.
//!
//! `Game` owns one table: seats, deck, melds, turn counter and status.
//! Views are plain serializable snapshots for the caller to broadcast.

mod state;
mod view;

pub use state::{Game, GameStatus};
pub use view::{MeldView, PlayerView, SeatSummary, TableView};
