//! Player identification, seats, and the per-seat `Player` record.
//!
//! ## PlayerId
//!
//! Caller-assigned actor token (a connection id, a user id...). The engine
//! only compares it for equality.
//!
//! ## Seat
//!
//! Fixed table position 0-3. Seat order drives dealing and turn rotation.

use serde::{Deserialize, Serialize};

use super::stone::Stone;

/// Caller-assigned player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Table position, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a table with `seat_count` seats.
    ///
    /// ```
    /// use hugo_okey::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[0], Seat::new(0));
    /// assert_eq!(seats[3], Seat::new(3));
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = Seat> {
        (0..seat_count as u8).map(Seat)
    }

    /// Check that the seat exists at a table with `seat_count` seats.
    #[must_use]
    pub const fn is_valid(self, seat_count: usize) -> bool {
        (self.0 as usize) < seat_count
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// A seated player.
///
/// The hand is ordered (deal/draw order) and only reachable through methods
/// so that removal semantics stay in one place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Caller-assigned id.
    pub id: PlayerId,

    /// Display name. Blank names do not count as a seated player.
    pub name: String,

    /// Table position.
    pub seat: Seat,

    /// Accumulated score (penalty points; lower is better).
    pub score: i64,

    /// Has this player opened a meld this round?
    pub has_opened_hand: bool,

    /// The stone this player threw most recently.
    pub last_thrown_stone: Option<Stone>,

    hand: Vec<Stone>,
}

impl Player {
    /// Create a player at a seat with an empty hand.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, seat: Seat) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seat,
            score: 0,
            has_opened_hand: false,
            last_thrown_stone: None,
            hand: Vec::new(),
        }
    }

    /// Does this player have a usable (non-blank) name?
    #[must_use]
    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The player's hand.
    #[must_use]
    pub fn hand(&self) -> &[Stone] {
        &self.hand
    }

    /// Number of stones in hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Add a stone to the end of the hand.
    pub fn add_stone(&mut self, stone: Stone) {
        self.hand.push(stone);
    }

    /// Replace the whole hand.
    pub fn set_hand(&mut self, hand: Vec<Stone>) {
        self.hand = hand;
    }

    /// Remove the first stone equal to `stone`.
    ///
    /// With duplicate tiles only one copy is removed.
    /// Returns true if a stone was found and removed.
    pub fn remove_stone(&mut self, stone: &Stone) -> bool {
        if let Some(pos) = self.hand.iter().position(|s| s == stone) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check that the hand holds every stone in `stones`, counting duplicates.
    #[must_use]
    pub fn holds_all(&self, stones: &[Stone]) -> bool {
        self.missing_stone(stones).is_none()
    }

    /// Find the first stone of `stones` the hand cannot supply.
    ///
    /// Each hand stone supplies at most one requested stone.
    #[must_use]
    pub fn missing_stone(&self, stones: &[Stone]) -> Option<Stone> {
        let mut remaining = self.hand.clone();
        for stone in stones {
            match remaining.iter().position(|s| s == stone) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => return Some(*stone),
            }
        }
        None
    }

    /// Remove every stone in `stones`, or nothing at all.
    ///
    /// Returns false (hand untouched) if any stone is missing.
    pub fn remove_stones(&mut self, stones: &[Stone]) -> bool {
        if !self.holds_all(stones) {
            return false;
        }
        for stone in stones {
            self.remove_stone(stone);
        }
        true
    }

    /// Empty the hand, returning its stones.
    pub fn take_hand(&mut self) -> Vec<Stone> {
        std::mem::take(&mut self.hand)
    }
}
