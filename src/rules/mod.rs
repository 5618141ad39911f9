//! Pure rule functions for the Hugo variant.
//!
//! - Deck construction and round-robin dealing
//! - Okey determination from the indicator
//! - End-of-round scoring
//!
//! Nothing here touches a `Game`; the aggregate in `crate::game` calls into
//! these functions.

pub mod deck;
pub mod okey;
pub mod scoring;

pub use deck::{build_deck, deal, ordered_deck, Deal, COPIES_PER_STONE, JOKER_COUNT};
pub use okey::{count_okey, determine_okey, next_number};
pub use scoring::{round_penalty, score_hand};
