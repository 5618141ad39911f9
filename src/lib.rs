//! # hugo-okey
//!
//! Rules engine for Hugo-style Okey, the Turkish tile game.
//!
//! ## Design Principles
//!
//! 1. **Pure rules, owned state**: deck building, dealing, okey selection and
//!    scoring are free functions in `rules`. `Game` owns one table and calls
//!    into them.
//!
//! 2. **Seeded randomness**: every shuffle goes through `GameRng`. A fixed seed
//!    reproduces a whole game.
//!
//! 3. **One lock per room**: `GameDirectory` serializes operations within a
//!    room and lets different rooms proceed in parallel.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: the deck and discard pile are `im`
//!   vectors, so snapshots for broadcasting are cheap.
//!
//! - **Errors as values**: every operation returns `GameResult`. A rejected
//!   operation leaves the game untouched.
//!
//! - **Tracing**: lifecycle events log at `info`, mutations at `debug`,
//!   rejections at `warn`. The crate never installs a subscriber.
//!
//! ## Modules
//!
//! - `core`: Stones, players, ids, RNG, configuration, errors
//! - `melds`: Meld (per) classification, value and extension
//! - `rules`: Deck, dealing, okey determination, scoring
//! - `game`: The `Game` state machine and its views
//! - `registry`: The room directory

pub mod core;
pub mod melds;
pub mod rules;
pub mod game;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    GameError, GameResult, GameRng, GameRngState, HugoConfig, MeldId, Player, PlayerId, RoomId,
    Seat, Stone, StoneColor, DECK_SIZE,
};

pub use crate::melds::{classify, meld_value, ExtensionRule, MeldKind, Per};

pub use crate::rules::{build_deck, deal, determine_okey, score_hand, Deal};

pub use crate::game::{Game, GameStatus, MeldView, PlayerView, SeatSummary, TableView};

pub use crate::registry::{GameDirectory, GameHandle, SeatVacated};
