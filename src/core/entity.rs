//! Room and meld identifiers.
//!
//! ## ID Layout
//!
//! - `RoomId`: opaque string allocated by the caller or by the directory.
//! - `MeldId`: per-game counter starting at 1, assigned when a meld is
//!   opened. Ids are never reused within a game.
//!
//! ```
//! use hugo_okey::core::MeldId;
//!
//! let first = MeldId::FIRST;
//! assert_eq!(first.raw(), 1);
//! assert_eq!(first.next(), MeldId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a room (one `Game` per room).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl RoomId {
    /// Create a room ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an opened meld, unique within its game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeldId(pub u32);

impl MeldId {
    /// The id given to the first meld of a game.
    pub const FIRST: MeldId = MeldId(1);

    /// Create a meld ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for MeldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Meld({})", self.0)
    }
}
