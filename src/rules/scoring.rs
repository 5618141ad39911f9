//! End-of-round scoring.
//!
//! Scores are penalty points:
//! - Never opened: flat `unopened_penalty` (400)
//! - Opened: face value of the hand plus `okey_penalty` (100) for every
//!   okey tile still held

use crate::core::{HugoConfig, Player, Stone};

use super::okey::count_okey;

/// Penalty for a hand left at the end of the round.
///
/// Without a known okey only face values count.
#[must_use]
pub fn score_hand(hand: &[Stone], okey: Option<&Stone>, config: &HugoConfig) -> u32 {
    let face: u32 = hand.iter().map(|s| s.value()).sum();
    let okey_count = okey.map_or(0, |okey| count_okey(hand, okey)) as u32;
    face + okey_count * config.okey_penalty
}

/// Penalty a player takes when the round finishes.
#[must_use]
pub fn round_penalty(player: &Player, okey: Option<&Stone>, config: &HugoConfig) -> u32 {
    if player.has_opened_hand {
        score_hand(player.hand(), okey, config)
    } else {
        config.unopened_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Seat, StoneColor};

    #[test]
    fn test_score_hand_face_value() {
        let config = HugoConfig::default();
        let hand = [Stone::new(3, StoneColor::Red), Stone::new(10, StoneColor::Blue)];
        assert_eq!(score_hand(&hand, None, &config), 130);
    }

    #[test]
    fn test_score_hand_okey_penalty() {
        let config = HugoConfig::default();
        let okey = Stone::new(4, StoneColor::Yellow);
        let hand = [Stone::new(4, StoneColor::Yellow), Stone::new(2, StoneColor::Red)];
        // 40 + 20 + 100
        assert_eq!(score_hand(&hand, Some(&okey), &config), 160);
    }

    #[test]
    fn test_score_hand_joker_okey() {
        let config = HugoConfig::default();
        let hand = [Stone::joker(), Stone::joker(), Stone::new(1, StoneColor::Black)];
        // Jokers are worth 0 each, plus 100 each as okey.
        assert_eq!(score_hand(&hand, Some(&Stone::joker()), &config), 210);
    }

    #[test]
    fn test_round_penalty_unopened() {
        let config = HugoConfig::default();
        let mut player = Player::new("p", "Ayse", Seat::new(0));
        player.set_hand(vec![Stone::new(13, StoneColor::Red)]);
        assert_eq!(round_penalty(&player, None, &config), 400);

        player.has_opened_hand = true;
        assert_eq!(round_penalty(&player, None, &config), 130);
    }

    #[test]
    fn test_round_penalty_empty_hand() {
        let config = HugoConfig::default();
        let mut player = Player::new("p", "Ayse", Seat::new(0));
        player.has_opened_hand = true;
        assert_eq!(round_penalty(&player, Some(&Stone::joker()), &config), 0);
    }
}
