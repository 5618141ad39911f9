//! Stones (tiles) and their colors.
//!
//! A `Stone` is a plain value: two stones are "the same stone" when their
//! number, color and joker flag match. There is no per-tile identity, so the
//! two physical copies of (7, Blue) are interchangeable everywhere.
//!
//! ## Okey Marking
//!
//! Stones carry no "is okey" flag. Whether a stone is the round's okey tile
//! is answered against the recorded okey stone:
//!
//! ```
//! use hugo_okey::core::{Stone, StoneColor};
//!
//! let okey = Stone::new(6, StoneColor::Blue);
//!
//! assert!(Stone::new(6, StoneColor::Blue).is_okey_for(&okey));
//! assert!(!Stone::new(6, StoneColor::Red).is_okey_for(&okey));
//!
//! // In a Hugo turn the okey is the joker itself.
//! assert!(Stone::joker().is_okey_for(&Stone::joker()));
//! ```

use serde::{Deserialize, Serialize};

/// Lowest face number.
pub const MIN_NUMBER: u8 = 1;

/// Highest face number.
pub const MAX_NUMBER: u8 = 13;

/// Number carried by joker stones.
pub const JOKER_NUMBER: u8 = 0;

/// Stone color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoneColor {
    Red,
    Yellow,
    Blue,
    Black,
}

impl StoneColor {
    /// All colors in deck enumeration order.
    pub const ALL: [StoneColor; 4] = [
        StoneColor::Red,
        StoneColor::Yellow,
        StoneColor::Blue,
        StoneColor::Black,
    ];
}

impl std::fmt::Display for StoneColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoneColor::Red => "Red",
            StoneColor::Yellow => "Yellow",
            StoneColor::Blue => "Blue",
            StoneColor::Black => "Black",
        };
        f.write_str(name)
    }
}

/// A single tile.
///
/// Jokers always have `number == 0`, so their face value is 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    /// Face number, 1-13 (0 for jokers).
    pub number: u8,

    /// Stone color. Jokers are printed black.
    pub color: StoneColor,

    /// Is this one of the two joker tiles?
    pub is_joker: bool,
}

impl Stone {
    /// Create a numbered stone.
    #[must_use]
    pub const fn new(number: u8, color: StoneColor) -> Self {
        Self {
            number,
            color,
            is_joker: false,
        }
    }

    /// Create a joker stone.
    #[must_use]
    pub const fn joker() -> Self {
        Self {
            number: JOKER_NUMBER,
            color: StoneColor::Black,
            is_joker: true,
        }
    }

    /// Point value: `number * 10`.
    ///
    /// Depends only on the number, so a joker is worth 0 even when it is
    /// the round's okey.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.number as u32 * 10
    }

    /// Check whether this stone is the okey tile described by `okey`.
    ///
    /// A joker `okey` means the jokers themselves are okey (Hugo turns).
    /// Otherwise only non-joker stones with the okey's number and color match.
    #[must_use]
    pub fn is_okey_for(&self, okey: &Stone) -> bool {
        if okey.is_joker {
            self.is_joker
        } else {
            !self.is_joker && self.number == okey.number && self.color == okey.color
        }
    }

    /// Check whether this stone acts as a wildcard in melds.
    ///
    /// Jokers are always wild. The okey tile is wild once it is known.
    #[must_use]
    pub fn is_wild(&self, okey: Option<&Stone>) -> bool {
        self.is_joker || okey.is_some_and(|okey| self.is_okey_for(okey))
    }

    /// Check that the number is in range for the stone kind.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.is_joker {
            self.number == JOKER_NUMBER
        } else {
            (MIN_NUMBER..=MAX_NUMBER).contains(&self.number)
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_joker {
            f.write_str("Joker")
        } else {
            write!(f, "{} {}", self.color, self.number)
        }
    }
}
