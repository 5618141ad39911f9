//! Rule configuration.
//!
//! `HugoConfig::default()` is the Hugo variant as played: four seats,
//! 15/14 stone hands, nine turns, Hugo turns on 1, 5 and 9, a 51-point
//! opening threshold, and 400/100 point penalties.
//!
//! ```
//! use hugo_okey::core::HugoConfig;
//!
//! let config = HugoConfig::default()
//!     .with_seed(7)
//!     .with_round_length(5);
//!
//! assert_eq!(config.seed, Some(7));
//! assert!(config.is_hugo_turn(1));
//! assert!(!config.is_hugo_turn(2));
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Tiles in a full set: 2 x 13 numbers x 4 colors + 2 jokers.
pub const DECK_SIZE: usize = 106;

/// Rule parameters for one table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HugoConfig {
    /// Number of seats that must be filled before `start`.
    pub seat_count: usize,

    /// Stones dealt to seat 0.
    pub first_seat_hand: usize,

    /// Stones dealt to every other seat.
    pub hand_size: usize,

    /// Turns in a round. The round finishes when this is exceeded.
    pub round_length: u32,

    /// Turns on which the jokers are the okey tile.
    pub hugo_turns: Vec<u32>,

    /// Minimum total value of an opening meld.
    pub opening_threshold: u32,

    /// Penalty for finishing the round without opening.
    pub unopened_penalty: u32,

    /// Extra penalty per okey tile left in hand.
    pub okey_penalty: u32,

    /// Require extensions to keep the meld's kind instead of only
    /// matching the first stone's number.
    pub strict_extension: bool,

    /// Root seed for shuffling and room ids. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for HugoConfig {
    fn default() -> Self {
        Self {
            seat_count: 4,
            first_seat_hand: 15,
            hand_size: 14,
            round_length: 9,
            hugo_turns: vec![1, 5, 9],
            opening_threshold: 51,
            unopened_penalty: 400,
            okey_penalty: 100,
            strict_extension: false,
            seed: None,
        }
    }
}

impl HugoConfig {
    /// Set the root seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the round length in turns.
    #[must_use]
    pub fn with_round_length(mut self, turns: u32) -> Self {
        self.round_length = turns;
        self
    }

    /// Set the Hugo turns.
    #[must_use]
    pub fn with_hugo_turns(mut self, turns: impl Into<Vec<u32>>) -> Self {
        self.hugo_turns = turns.into();
        self
    }

    /// Set the opening threshold.
    #[must_use]
    pub fn with_opening_threshold(mut self, threshold: u32) -> Self {
        self.opening_threshold = threshold;
        self
    }

    /// Use the kind-preserving extension rule.
    #[must_use]
    pub fn strict_extension(mut self) -> Self {
        self.strict_extension = true;
        self
    }

    /// Is `turn` a Hugo turn?
    #[must_use]
    pub fn is_hugo_turn(&self, turn: u32) -> bool {
        self.hugo_turns.contains(&turn)
    }

    /// Total stones leaving the deck during the deal (hands + indicator).
    #[must_use]
    pub fn stones_dealt(&self) -> usize {
        self.first_seat_hand + self.hand_size * self.seat_count.saturating_sub(1) + 1
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> GameResult<()> {
        if self.seat_count == 0 || self.seat_count > u8::MAX as usize {
            return Err(GameError::InvalidConfig(format!(
                "seat count {} out of range",
                self.seat_count
            )));
        }
        if self.first_seat_hand < self.hand_size {
            return Err(GameError::InvalidConfig(
                "first seat must receive at least a normal hand".to_string(),
            ));
        }
        if self.first_seat_hand > self.hand_size + 1 {
            return Err(GameError::InvalidConfig(
                "first seat may receive at most one extra stone".to_string(),
            ));
        }
        if self.stones_dealt() > DECK_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "dealing needs {} stones, deck has {}",
                self.stones_dealt(),
                DECK_SIZE
            )));
        }
        if self.round_length == 0 {
            return Err(GameError::InvalidConfig("round length must be positive".to_string()));
        }
        Ok(())
    }
}
