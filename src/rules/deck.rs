//! Deck construction and dealing.
//!
//! The deck is an `im::Vector` so that game snapshots share it instead of
//! copying 106 stones. Draws always come off the front.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{
    GameError, GameResult, GameRng, HugoConfig, Player, PlayerId, Stone, StoneColor, DECK_SIZE,
    MAX_NUMBER, MIN_NUMBER,
};

/// Copies of each numbered stone in a set.
pub const COPIES_PER_STONE: usize = 2;

/// Joker tiles in a set.
pub const JOKER_COUNT: usize = 2;

/// All 106 stones in enumeration order: each (number, color) pair twice,
/// then the two jokers.
#[must_use]
pub fn ordered_deck() -> Vec<Stone> {
    let mut stones = Vec::with_capacity(DECK_SIZE);
    for color in StoneColor::ALL {
        for number in MIN_NUMBER..=MAX_NUMBER {
            for _ in 0..COPIES_PER_STONE {
                stones.push(Stone::new(number, color));
            }
        }
    }
    stones.extend(std::iter::repeat(Stone::joker()).take(JOKER_COUNT));
    stones
}

/// Build a shuffled deck.
///
/// Every call yields the same multiset of 106 stones; only the order
/// depends on `rng`.
#[must_use]
pub fn build_deck(rng: &mut GameRng) -> Vector<Stone> {
    let mut stones = ordered_deck();
    rng.shuffle(&mut stones);
    stones.into_iter().collect()
}

/// Outcome of dealing a round.
#[derive(Clone, Debug)]
pub struct Deal {
    /// Dealt hands, keyed by player.
    pub hands: FxHashMap<PlayerId, Vec<Stone>>,

    /// Stone turned up after the hands. It belongs to no hand and does not
    /// return to the deck.
    pub indicator: Stone,

    /// What is left to draw from.
    pub remaining: Vector<Stone>,
}

/// Deal hands round-robin in seat order, then turn up the indicator.
///
/// `players` must be sorted by seat. Each pass gives one stone to every
/// seat that still needs one, so seat 0 receives its extra stone on the
/// last pass.
pub fn deal(mut deck: Vector<Stone>, players: &[Player], config: &HugoConfig) -> GameResult<Deal> {
    if players.len() != config.seat_count {
        return Err(GameError::invalid_state(format!(
            "dealing needs {} seated players, found {}",
            config.seat_count,
            players.len()
        )));
    }
    if let Some(player) = players.iter().find(|p| !p.has_valid_name()) {
        return Err(GameError::invalid_state(format!("player {} has no name", player.id)));
    }

    let targets: Vec<usize> = (0..players.len())
        .map(|i| if i == 0 { config.first_seat_hand } else { config.hand_size })
        .collect();
    let passes = targets.iter().copied().max().unwrap_or(0);

    let mut hands: Vec<Vec<Stone>> = targets.iter().map(|&n| Vec::with_capacity(n)).collect();
    for pass in 0..passes {
        for (hand, &target) in hands.iter_mut().zip(&targets) {
            if pass < target {
                hand.push(deck.pop_front().ok_or(GameError::DeckEmpty)?);
            }
        }
    }

    let indicator = deck.pop_front().ok_or(GameError::DeckEmpty)?;
    debug!(%indicator, remaining = deck.len(), "Dealt hands");

    let hands = players
        .iter()
        .map(|p| p.id.clone())
        .zip(hands)
        .collect();

    Ok(Deal {
        hands,
        indicator,
        remaining: deck,
    })
}
