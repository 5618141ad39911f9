//! Melds ("pers"): classification, extension, and opening.
//!
//! A meld's kind is never stored. `Per::kind()` reclassifies the current
//! stones every time, so the kind cannot drift from the stones.
//!
//! ## Wild Stones
//!
//! Jokers and the round's okey tile are wild: they are left out of the
//! structural check. The fixed stones of a run must still be consecutive;
//! a wild can lengthen a run but does not bridge a gap inside it.
//!
//! ```
//! use hugo_okey::core::{Stone, StoneColor};
//! use hugo_okey::melds::{classify, MeldKind};
//!
//! let red = |n| Stone::new(n, StoneColor::Red);
//!
//! assert_eq!(classify(&[red(4), red(5), red(6)], None), MeldKind::Sequential);
//! assert_eq!(classify(&[red(4), red(5), Stone::joker()], None), MeldKind::Sequential);
//! assert_eq!(classify(&[red(4), Stone::joker(), red(6)], None), MeldKind::Invalid);
//! assert_eq!(classify(&[Stone::joker(), Stone::joker()], None), MeldKind::Invalid);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameError, GameResult, MeldId, PlayerId, Stone};

/// Inline capacity for meld stones; a full run is 13 stones.
type MeldStones = SmallVec<[Stone; 8]>;

/// Structural classification of a group of stones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    /// Neither a set nor a run (also: no non-wild stone at all).
    Invalid,
    /// Every non-wild stone has the same number. Colors are not checked.
    SameNumber,
    /// One color, consecutive numbers, no 13 -> 1 wrap.
    Sequential,
}

/// How a non-wild candidate stone is checked against a meld.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionRule {
    /// The candidate must carry the number of the meld's first non-wild
    /// stone. Color and run position are not checked. Leading jokers or
    /// okey tiles are skipped when finding that first stone.
    #[default]
    FirstNumber,
    /// The meld plus the candidate must classify to the meld's current kind.
    PreserveKind,
}

/// Classify stones, treating jokers and (if known) the okey tile as wild.
///
/// A single non-wild stone classifies as `SameNumber`.
#[must_use]
pub fn classify(stones: &[Stone], okey: Option<&Stone>) -> MeldKind {
    let mut fixed: MeldStones = stones.iter().filter(|s| !s.is_wild(okey)).copied().collect();

    let Some(first) = fixed.first().copied() else {
        return MeldKind::Invalid;
    };

    if fixed.iter().all(|s| s.number == first.number) {
        return MeldKind::SameNumber;
    }

    if fixed.iter().any(|s| s.color != first.color) {
        return MeldKind::Invalid;
    }

    fixed.sort_by_key(|s| s.number);
    if fixed.windows(2).all(|w| w[1].number == w[0].number + 1) {
        MeldKind::Sequential
    } else {
        MeldKind::Invalid
    }
}

/// Total face value of `stones`.
#[must_use]
pub fn meld_value(stones: &[Stone]) -> u32 {
    stones.iter().map(|s| s.value()).sum()
}

/// An opened meld on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Per {
    id: MeldId,
    owner: PlayerId,
    stones: MeldStones,
    /// The round's okey tile, fixed for the meld's lifetime.
    okey: Option<Stone>,
}

impl Per {
    /// Build a meld without any value check.
    pub fn new(id: MeldId, owner: PlayerId, stones: &[Stone], okey: Option<Stone>) -> Self {
        Self {
            id,
            owner,
            stones: stones.iter().copied().collect(),
            okey,
        }
    }

    /// Build an opening meld, rejecting it below `threshold` points.
    pub fn open(
        id: MeldId,
        owner: PlayerId,
        stones: &[Stone],
        okey: Option<Stone>,
        threshold: u32,
    ) -> GameResult<Self> {
        let value = meld_value(stones);
        if value < threshold {
            return Err(GameError::MeldTooSmall {
                value,
                required: threshold,
            });
        }
        Ok(Self::new(id, owner, stones, okey))
    }

    /// Meld id.
    #[must_use]
    pub fn id(&self) -> MeldId {
        self.id
    }

    /// Player who opened the meld.
    #[must_use]
    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    /// Stones in the meld, in play order.
    #[must_use]
    pub fn stones(&self) -> &[Stone] {
        &self.stones
    }

    /// Number of stones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// Does the meld hold no stones?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Current classification.
    #[must_use]
    pub fn kind(&self) -> MeldKind {
        classify(&self.stones, self.okey.as_ref())
    }

    /// Total face value.
    #[must_use]
    pub fn value(&self) -> u32 {
        meld_value(&self.stones)
    }

    /// The first stone that is not wild.
    #[must_use]
    pub fn anchor(&self) -> Option<&Stone> {
        let okey = self.okey.as_ref();
        self.stones.iter().find(|s| !s.is_wild(okey))
    }

    /// Check whether `candidate` may be added.
    ///
    /// - An empty meld accepts anything.
    /// - An `Invalid` meld accepts nothing.
    /// - A wild candidate is always accepted.
    /// - Otherwise `rule` decides.
    #[must_use]
    pub fn can_extend(&self, candidate: &Stone, rule: ExtensionRule) -> bool {
        if self.stones.is_empty() {
            return true;
        }

        let kind = self.kind();
        if kind == MeldKind::Invalid {
            return false;
        }

        if candidate.is_wild(self.okey.as_ref()) {
            return true;
        }

        match rule {
            ExtensionRule::FirstNumber => self
                .anchor()
                .is_some_and(|anchor| anchor.number == candidate.number),
            ExtensionRule::PreserveKind => {
                let mut extended = self.stones.clone();
                extended.push(*candidate);
                classify(&extended, self.okey.as_ref()) == kind
            }
        }
    }

    /// Append a stone. Callers check `can_extend` first.
    pub(crate) fn push(&mut self, stone: Stone) {
        self.stones.push(stone);
    }
}
