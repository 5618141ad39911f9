//! Okey tile determination.
//!
//! The okey is the stone after the indicator in the same color (13 wraps
//! to 1). In Hugo turns, or when the indicator is itself a joker, the
//! jokers are the okey.
//!
//! The result is a single recorded `Stone`; individual tiles are tested
//! against it with `Stone::is_okey_for`.

use crate::core::{Stone, MAX_NUMBER, MIN_NUMBER};

/// Number following `number`, wrapping 13 -> 1.
#[must_use]
pub const fn next_number(number: u8) -> u8 {
    if number >= MAX_NUMBER {
        MIN_NUMBER
    } else {
        number + 1
    }
}

/// Determine the round's okey stone.
///
/// ```
/// use hugo_okey::core::{Stone, StoneColor};
/// use hugo_okey::rules::determine_okey;
///
/// let okey = determine_okey(&Stone::new(13, StoneColor::Red), false);
/// assert_eq!(okey, Stone::new(1, StoneColor::Red));
///
/// assert_eq!(determine_okey(&Stone::new(13, StoneColor::Red), true), Stone::joker());
/// ```
#[must_use]
pub fn determine_okey(indicator: &Stone, is_hugo_turn: bool) -> Stone {
    if is_hugo_turn || indicator.is_joker {
        Stone::joker()
    } else {
        Stone::new(next_number(indicator.number), indicator.color)
    }
}

/// Count the stones in `stones` that are the okey tile.
#[must_use]
pub fn count_okey(stones: &[Stone], okey: &Stone) -> usize {
    stones.iter().filter(|s| s.is_okey_for(okey)).count()
}
