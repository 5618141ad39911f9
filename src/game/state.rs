//! The `Game` aggregate: one table, one round.
//!
//! ## Lifecycle
//!
//! `WaitingToStart` -> `InProgress` (via `start`) -> `Finished` (when the
//! turn counter passes the round length). There are no other transitions.
//!
//! ## Atomicity
//!
//! Every operation validates everything before it mutates anything, so an
//! `Err` leaves the game exactly as it was.
//!
//! ## Stone Conservation
//!
//! Once dealt, deck + hands + melds + discards + indicator always hold all
//! 106 stones (`stone_count`).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    GameError, GameResult, GameRng, HugoConfig, MeldId, Player, PlayerId, RoomId, Seat, Stone,
};
use crate::melds::{ExtensionRule, Per};
use crate::rules::{build_deck, deal, determine_okey, round_penalty};

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    WaitingToStart,
    InProgress,
    Finished,
}

/// A table of up to four seated players and everything on it.
#[derive(Clone, Debug)]
pub struct Game {
    id: RoomId,
    config: HugoConfig,

    /// Seated players, sorted by seat.
    players: Vec<Player>,

    /// Draw pile; draws come off the front.
    deck: Vector<Stone>,

    /// Thrown stones, oldest first.
    discards: Vector<Stone>,

    opened_melds: Vec<Per>,
    indicator: Option<Stone>,
    okey_stone: Option<Stone>,

    /// Turn number (starts at 1). One turn is one full rotation.
    current_turn: u32,
    current_player: Option<PlayerId>,
    status: GameStatus,
    next_meld_id: MeldId,
}

impl Game {
    /// Create a game for a room and shuffle its deck.
    ///
    /// The players need not fill the table yet; they must sit on distinct,
    /// valid seats under distinct ids.
    pub fn new(
        id: RoomId,
        players: Vec<Player>,
        config: HugoConfig,
        rng: &mut GameRng,
    ) -> GameResult<Self> {
        config.validate()?;

        let mut game = Self {
            id,
            players: Vec::with_capacity(config.seat_count),
            deck: build_deck(rng),
            discards: Vector::new(),
            opened_melds: Vec::new(),
            indicator: None,
            okey_stone: None,
            current_turn: 1,
            current_player: None,
            status: GameStatus::WaitingToStart,
            next_meld_id: MeldId::FIRST,
            config,
        };

        for player in players {
            game.add_player(player)?;
        }

        Ok(game)
    }

    // === Accessors ===

    /// Room id.
    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Rules in force.
    #[must_use]
    pub fn config(&self) -> &HugoConfig {
        &self.config
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Seated players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a seated player.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Current turn number.
    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Player whose turn it is (`None` before `start`).
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.current_player.as_ref()
    }

    /// Is the current turn a Hugo turn?
    #[must_use]
    pub fn is_hugo_turn(&self) -> bool {
        self.config.is_hugo_turn(self.current_turn)
    }

    /// The draw pile.
    #[must_use]
    pub fn deck(&self) -> &Vector<Stone> {
        &self.deck
    }

    /// Thrown stones, oldest first.
    #[must_use]
    pub fn discards(&self) -> &Vector<Stone> {
        &self.discards
    }

    /// Melds opened on the table, in opening order.
    #[must_use]
    pub fn opened_melds(&self) -> &[Per] {
        &self.opened_melds
    }

    /// Look up an opened meld.
    #[must_use]
    pub fn meld(&self, id: MeldId) -> Option<&Per> {
        self.opened_melds.iter().find(|m| m.id() == id)
    }

    /// Indicator turned up at the deal.
    #[must_use]
    pub fn indicator(&self) -> Option<Stone> {
        self.indicator
    }

    /// The round's okey stone (a joker in Hugo turns).
    #[must_use]
    pub fn okey_stone(&self) -> Option<Stone> {
        self.okey_stone
    }

    /// Is `stone` the round's okey tile?
    #[must_use]
    pub fn is_okey(&self, stone: &Stone) -> bool {
        self.okey_stone.is_some_and(|okey| stone.is_okey_for(&okey))
    }

    /// Stones accounted for across deck, hands, melds, discards and indicator.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.deck.len()
            + self.players.iter().map(Player::hand_size).sum::<usize>()
            + self.opened_melds.iter().map(Per::len).sum::<usize>()
            + self.discards.len()
            + usize::from(self.indicator.is_some())
    }

    /// First seat nobody sits on.
    #[must_use]
    pub fn first_free_seat(&self) -> Option<Seat> {
        Seat::all(self.config.seat_count)
            .find(|seat| self.players.iter().all(|p| p.seat != *seat))
    }

    // === Seating ===

    /// Seat a player before the game starts.
    pub fn add_player(&mut self, player: Player) -> GameResult<()> {
        if self.status != GameStatus::WaitingToStart {
            return Err(GameError::invalid_state("cannot join a game that has started"));
        }
        if self.players.len() >= self.config.seat_count {
            return Err(GameError::invalid_state("the table is full"));
        }
        if !player.seat.is_valid(self.config.seat_count) {
            return Err(GameError::invalid_state(format!("{} does not exist", player.seat)));
        }
        if self.players.iter().any(|p| p.seat == player.seat) {
            warn!(room = %self.id, seat = %player.seat, "Seat already taken");
            return Err(GameError::SeatConflict(player.seat));
        }
        if self.player(&player.id).is_some() {
            return Err(GameError::invalid_state(format!("player {} is already seated", player.id)));
        }

        debug!(room = %self.id, player = %player.id, seat = %player.seat, "Player seated");
        let pos = self.players.partition_point(|p| p.seat < player.seat);
        self.players.insert(pos, player);
        Ok(())
    }

    /// Vacate a player's seat.
    ///
    /// During a round the player's hand goes to the discard pile, and if it
    /// was their turn the next seat takes over. The seat is vacated before
    /// the turn passes, so a leaver is never scored.
    pub fn remove_player(&mut self, id: &PlayerId) -> GameResult<Player> {
        let index = self.seat_index(id)?;
        let in_round = self.status == GameStatus::InProgress;
        let was_current = self.current_player.as_ref() == Some(id);

        let mut player = self.players.remove(index);
        if in_round {
            self.discards.extend(player.take_hand());
        }

        if was_current {
            self.current_player = None;
            if in_round && !self.players.is_empty() {
                // The seat after the leaver has shifted down into `index`.
                let wraps = index == self.players.len();
                self.pass_turn_to(if wraps { 0 } else { index }, wraps);
            }
        }

        info!(room = %self.id, player = %id, remaining = self.players.len(), "Player left");
        Ok(player)
    }

    // === Round ===

    /// Deal, turn up the indicator, and hand the first turn to seat 0.
    pub fn start(&mut self) -> GameResult<()> {
        if self.status != GameStatus::WaitingToStart {
            return Err(GameError::invalid_state(format!(
                "cannot start a game that is {:?}",
                self.status
            )));
        }

        let dealt = deal(self.deck.clone(), &self.players, &self.config)?;
        let okey = determine_okey(&dealt.indicator, self.is_hugo_turn());

        let mut hands = dealt.hands;
        for player in &mut self.players {
            player.set_hand(hands.remove(&player.id).unwrap_or_default());
        }
        self.deck = dealt.remaining;
        self.indicator = Some(dealt.indicator);
        self.okey_stone = Some(okey);
        self.current_player = self.players.first().map(|p| p.id.clone());
        self.status = GameStatus::InProgress;

        info!(
            room = %self.id,
            indicator = %dealt.indicator,
            okey = %okey,
            hugo = self.is_hugo_turn(),
            "Game started"
        );
        Ok(())
    }

    /// Draw the front stone of the deck into the current player's hand.
    pub fn draw_stone(&mut self, id: &PlayerId) -> GameResult<Stone> {
        self.ensure_in_progress()?;
        let index = self.ensure_turn(id)?;

        let stone = self.deck.pop_front().ok_or_else(|| {
            warn!(room = %self.id, player = %id, "Draw from empty deck");
            GameError::DeckEmpty
        })?;
        self.players[index].add_stone(stone);

        debug!(room = %self.id, player = %id, %stone, remaining = self.deck.len(), "Stone drawn");
        Ok(stone)
    }

    /// Throw a stone from the current player's hand and pass the turn.
    pub fn throw_stone(&mut self, id: &PlayerId, stone: Stone) -> GameResult<()> {
        self.ensure_in_progress()?;
        let index = self.ensure_turn(id)?;

        let player = &mut self.players[index];
        if !player.remove_stone(&stone) {
            return Err(GameError::StoneNotInHand(stone));
        }
        player.last_thrown_stone = Some(stone);
        self.discards.push_back(stone);

        debug!(room = %self.id, player = %id, %stone, "Stone thrown");
        self.next_turn()
    }

    /// Open a meld from a player's hand.
    ///
    /// The stones must be worth at least the opening threshold and all be
    /// in the hand (duplicates counted).
    pub fn open_meld(&mut self, id: &PlayerId, stones: &[Stone]) -> GameResult<Per> {
        self.ensure_in_progress()?;
        let index = self.seat_index(id)?;

        let per = Per::open(
            self.next_meld_id,
            id.clone(),
            stones,
            self.okey_stone,
            self.config.opening_threshold,
        )
        .inspect_err(|e| warn!(room = %self.id, player = %id, error = %e, "Meld rejected"))?;

        let player = &mut self.players[index];
        if let Some(missing) = player.missing_stone(stones) {
            return Err(GameError::StoneNotInHand(missing));
        }
        player.remove_stones(stones);
        player.has_opened_hand = true;

        self.next_meld_id = self.next_meld_id.next();
        self.opened_melds.push(per.clone());

        info!(
            room = %self.id,
            player = %id,
            meld = %per.id(),
            kind = ?per.kind(),
            value = per.value(),
            "Meld opened"
        );
        Ok(per)
    }

    /// Add a stone from a player's hand to any opened meld.
    pub fn add_to_meld(&mut self, id: &PlayerId, stone: Stone, meld_id: MeldId) -> GameResult<()> {
        self.ensure_in_progress()?;
        let index = self.seat_index(id)?;

        let rule = if self.config.strict_extension {
            ExtensionRule::PreserveKind
        } else {
            ExtensionRule::FirstNumber
        };

        let meld_index = self
            .opened_melds
            .iter()
            .position(|m| m.id() == meld_id)
            .ok_or(GameError::MeldNotFound(meld_id))?;

        if !self.opened_melds[meld_index].can_extend(&stone, rule) {
            warn!(room = %self.id, player = %id, meld = %meld_id, %stone, "Extension rejected");
            return Err(GameError::CannotAccept { meld: meld_id, stone });
        }

        if !self.players[index].remove_stone(&stone) {
            return Err(GameError::StoneNotInHand(stone));
        }
        self.opened_melds[meld_index].push(stone);

        debug!(room = %self.id, player = %id, meld = %meld_id, %stone, "Stone added to meld");
        Ok(())
    }

    /// Pass the turn to the next seat.
    ///
    /// Wrapping back to the first seat starts a new turn; passing the round
    /// length finishes the game and scores it.
    pub fn next_turn(&mut self) -> GameResult<()> {
        self.ensure_in_progress()?;

        let index = self
            .current_player
            .as_ref()
            .and_then(|id| self.players.iter().position(|p| &p.id == id))
            .unwrap_or(0);
        self.advance_turn_from(index);
        Ok(())
    }

    // === Internals ===

    fn advance_turn_from(&mut self, index: usize) {
        if self.players.is_empty() {
            self.current_player = None;
            return;
        }
        let next = (index + 1) % self.players.len();
        self.pass_turn_to(next, next == 0);
    }

    fn pass_turn_to(&mut self, next: usize, new_turn: bool) {
        self.current_player = Some(self.players[next].id.clone());

        if new_turn {
            self.current_turn += 1;
            debug!(
                room = %self.id,
                turn = self.current_turn,
                hugo = self.is_hugo_turn(),
                "New turn"
            );
            if self.current_turn > self.config.round_length {
                self.finish();
            }
        }
    }

    fn finish(&mut self) {
        self.status = GameStatus::Finished;

        let okey = self.okey_stone;
        for player in &mut self.players {
            let penalty = round_penalty(player, okey.as_ref(), &self.config);
            player.score += i64::from(penalty);
            debug!(room = %self.id, player = %player.id, penalty, score = player.score, "Scored");
        }

        info!(room = %self.id, "Game finished");
    }

    fn ensure_in_progress(&self) -> GameResult<()> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            status => Err(GameError::invalid_state(format!("game is {:?}", status))),
        }
    }

    fn seat_index(&self, id: &PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::PlayerNotFound(id.clone()))
    }

    fn ensure_turn(&self, id: &PlayerId) -> GameResult<usize> {
        if self.current_player.as_ref() != Some(id) {
            warn!(room = %self.id, player = %id, "Acted out of turn");
            return Err(GameError::NotYourTurn(id.clone()));
        }
        self.seat_index(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StoneColor, DECK_SIZE};
    use crate::melds::MeldKind;
    use crate::rules::next_number;

    fn seated(count: u8) -> Vec<Player> {
        ["Ayse", "Bora", "Cem", "Deniz"]
            .iter()
            .take(count as usize)
            .enumerate()
            .map(|(i, name)| Player::new(format!("p{}", i).as_str(), *name, Seat::new(i as u8)))
            .collect()
    }

    fn new_game(count: u8) -> Game {
        let mut rng = GameRng::new(42);
        Game::new(RoomId::from("room"), seated(count), HugoConfig::default(), &mut rng).unwrap()
    }

    fn started() -> Game {
        let mut game = new_game(4);
        game.start().unwrap();
        game
    }

    fn started_with(config: HugoConfig, seed: u64) -> Game {
        let mut rng = GameRng::new(seed);
        let mut game = Game::new(RoomId::from("room"), seated(4), config, &mut rng).unwrap();
        game.start().unwrap();
        game
    }

    fn pid(i: usize) -> PlayerId {
        PlayerId::new(format!("p{}", i))
    }

    #[test]
    fn test_new_game() {
        let game = new_game(2);
        assert_eq!(game.status(), GameStatus::WaitingToStart);
        assert_eq!(game.current_turn(), 1);
        assert_eq!(game.deck().len(), DECK_SIZE);
        assert_eq!(game.current_player(), None);
        assert_eq!(game.first_free_seat(), Some(Seat::new(2)));
    }

    #[test]
    fn test_new_game_seat_conflict() {
        let mut rng = GameRng::new(1);
        let players = vec![
            Player::new("a", "Ayse", Seat::new(1)),
            Player::new("b", "Bora", Seat::new(1)),
        ];
        let result = Game::new(RoomId::from("r"), players, HugoConfig::default(), &mut rng);
        assert_eq!(result.unwrap_err(), GameError::SeatConflict(Seat::new(1)));
    }

    #[test]
    fn test_players_sorted_by_seat() {
        let mut game = new_game(0);
        game.add_player(Player::new("c", "Cem", Seat::new(2))).unwrap();
        game.add_player(Player::new("a", "Ayse", Seat::new(0))).unwrap();

        let seats: Vec<Seat> = game.players().iter().map(|p| p.seat).collect();
        assert_eq!(seats, vec![Seat::new(0), Seat::new(2)]);
    }

    #[test]
    fn test_add_player_full_table() {
        let mut game = new_game(4);
        let result = game.add_player(Player::new("e", "Ece", Seat::new(0)));
        assert!(matches!(result, Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_start_requires_four() {
        let mut game = new_game(3);
        assert!(matches!(game.start(), Err(GameError::InvalidState(_))));
        assert_eq!(game.status(), GameStatus::WaitingToStart);
        assert_eq!(game.deck().len(), DECK_SIZE);
    }

    #[test]
    fn test_start_deals() {
        let game = started();

        assert_eq!(game.status(), GameStatus::InProgress);
        let sizes: Vec<usize> = game.players().iter().map(Player::hand_size).collect();
        assert_eq!(sizes, vec![15, 14, 14, 14]);
        assert_eq!(game.deck().len(), 48);
        assert!(game.indicator().is_some());
        assert_eq!(game.current_player(), Some(&pid(0)));
        assert_eq!(game.stone_count(), DECK_SIZE);
    }

    #[test]
    fn test_first_turn_is_hugo() {
        let game = started();
        assert!(game.is_hugo_turn());
        assert_eq!(game.okey_stone(), Some(Stone::joker()));
        assert!(game.is_okey(&Stone::joker()));
    }

    #[test]
    fn test_start_twice() {
        let mut game = started();
        assert!(matches!(game.start(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_actions_before_start() {
        let mut game = new_game(4);
        assert!(matches!(game.draw_stone(&pid(0)), Err(GameError::InvalidState(_))));
        assert!(matches!(game.next_turn(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_draw_stone() {
        let mut game = started();
        let front = *game.deck().front().unwrap();

        let drawn = game.draw_stone(&pid(0)).unwrap();

        assert_eq!(drawn, front);
        assert_eq!(game.player(&pid(0)).unwrap().hand_size(), 16);
        assert_eq!(game.deck().len(), 47);
        assert_eq!(game.stone_count(), DECK_SIZE);
    }

    #[test]
    fn test_draw_not_your_turn() {
        let mut game = started();
        assert_eq!(game.draw_stone(&pid(1)), Err(GameError::NotYourTurn(pid(1))));
        assert_eq!(game.deck().len(), 48);
    }

    #[test]
    fn test_draw_empty_deck() {
        let mut game = started();
        while !game.deck().is_empty() {
            game.draw_stone(&pid(0)).unwrap();
        }
        let hands: Vec<usize> = game.players().iter().map(Player::hand_size).collect();

        assert_eq!(game.draw_stone(&pid(0)), Err(GameError::DeckEmpty));

        let after: Vec<usize> = game.players().iter().map(Player::hand_size).collect();
        assert_eq!(hands, after);
    }

    #[test]
    fn test_throw_stone_advances_turn() {
        let mut game = started();
        let stone = game.player(&pid(0)).unwrap().hand()[0];

        game.throw_stone(&pid(0), stone).unwrap();

        let thrower = game.player(&pid(0)).unwrap();
        assert_eq!(thrower.hand_size(), 14);
        assert_eq!(thrower.last_thrown_stone, Some(stone));
        assert_eq!(game.discards().back(), Some(&stone));
        assert_eq!(game.current_player(), Some(&pid(1)));
        assert_eq!(game.stone_count(), DECK_SIZE);
    }

    #[test]
    fn test_throw_stone_not_in_hand() {
        let mut game = started();
        let hand = game.player(&pid(0)).unwrap().hand().to_vec();
        let absent = crate::rules::ordered_deck()
            .into_iter()
            .find(|s| !hand.contains(s))
            .unwrap();

        assert_eq!(game.throw_stone(&pid(0), absent), Err(GameError::StoneNotInHand(absent)));
        assert_eq!(game.current_player(), Some(&pid(0)));
    }

    #[test]
    fn test_full_rotation() {
        let mut game = started();
        for _ in 0..4 {
            game.next_turn().unwrap();
        }
        assert_eq!(game.current_player(), Some(&pid(0)));
        assert_eq!(game.current_turn(), 2);
        assert!(!game.is_hugo_turn());
    }

    #[test]
    fn test_round_finishes_and_scores_once() {
        let mut game = started();
        for _ in 0..35 {
            game.next_turn().unwrap();
        }
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_turn(), 9);

        game.next_turn().unwrap();

        assert_eq!(game.status(), GameStatus::Finished);
        for player in game.players() {
            assert_eq!(player.score, 400);
        }
        assert!(matches!(game.next_turn(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_open_meld_below_threshold() {
        let mut game = started();
        let stones = vec![Stone::new(1, StoneColor::Red); 5];
        game.players[0].set_hand(stones.clone());

        let err = game.open_meld(&pid(0), &stones).unwrap_err();

        assert_eq!(err, GameError::MeldTooSmall { value: 50, required: 51 });
        assert_eq!(game.players[0].hand_size(), 5);
        assert!(!game.players[0].has_opened_hand);
        assert!(game.opened_melds().is_empty());
    }

    #[test]
    fn test_open_meld_missing_stone() {
        let mut game = started();
        let red = |n| Stone::new(n, StoneColor::Red);
        game.players[0].set_hand(vec![red(10), red(11)]);

        let err = game.open_meld(&pid(0), &[red(10), red(11), red(12)]).unwrap_err();

        assert_eq!(err, GameError::StoneNotInHand(red(12)));
        assert_eq!(game.players[0].hand_size(), 2);
    }

    #[test]
    fn test_open_and_extend_meld() {
        let mut game = started();
        let blue = |n| Stone::new(n, StoneColor::Blue);
        let yellow = |n| Stone::new(n, StoneColor::Yellow);
        game.players[1].set_hand(vec![blue(9), yellow(9), Stone::new(9, StoneColor::Red), blue(2)]);
        game.players[2].set_hand(vec![Stone::new(9, StoneColor::Black)]);

        let per = game
            .open_meld(&pid(1), &[blue(9), yellow(9), Stone::new(9, StoneColor::Red)])
            .unwrap();
        assert_eq!(per.id(), MeldId::FIRST);
        assert!(game.player(&pid(1)).unwrap().has_opened_hand);
        assert_eq!(game.player(&pid(1)).unwrap().hand(), &[blue(2)]);

        // Any seat may extend any meld.
        game.add_to_meld(&pid(2), Stone::new(9, StoneColor::Black), per.id()).unwrap();
        assert_eq!(game.meld(per.id()).unwrap().len(), 4);
        assert_eq!(game.player(&pid(2)).unwrap().hand_size(), 0);

        assert_eq!(
            game.add_to_meld(&pid(1), blue(2), per.id()),
            Err(GameError::CannotAccept { meld: per.id(), stone: blue(2) })
        );
        assert_eq!(
            game.add_to_meld(&pid(1), blue(2), MeldId::new(99)),
            Err(GameError::MeldNotFound(MeldId::new(99)))
        );
        assert_eq!(
            game.add_to_meld(&pid(1), blue(9), per.id()),
            Err(GameError::StoneNotInHand(blue(9)))
        );
    }

    #[test]
    fn test_meld_ids_are_unique() {
        let mut game = started();
        let red = |n| Stone::new(n, StoneColor::Red);
        game.players[0].set_hand(vec![red(10), red(11), red(12), red(10), red(11), red(12)]);

        let first = game.open_meld(&pid(0), &[red(10), red(11), red(12)]).unwrap();
        let second = game.open_meld(&pid(0), &[red(10), red(11), red(12)]).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(game.player(&pid(0)).unwrap().hand_size(), 0);
    }

    #[test]
    fn test_scoring_opened_player() {
        let mut game = started();
        let red = |n| Stone::new(n, StoneColor::Red);
        game.players[0].set_hand(vec![red(10), red(11), red(12), red(3), Stone::joker()]);
        game.open_meld(&pid(0), &[red(10), red(11), red(12)]).unwrap();

        for _ in 0..36 {
            game.next_turn().unwrap();
        }

        // 30 face value + joker okey (0 + 100) in a Hugo-dealt round.
        assert_eq!(game.player(&pid(0)).unwrap().score, 130);
        assert_eq!(game.player(&pid(1)).unwrap().score, 400);
    }

    #[test]
    fn test_remove_current_player_passes_turn() {
        let mut game = started();
        let hand = game.player(&pid(0)).unwrap().hand_size();

        let removed = game.remove_player(&pid(0)).unwrap();

        assert_eq!(removed.id, pid(0));
        assert_eq!(game.current_player(), Some(&pid(1)));
        assert_eq!(game.discards().len(), hand);
        assert_eq!(game.stone_count(), DECK_SIZE);
    }

    #[test]
    fn test_remove_unknown_player() {
        let mut game = new_game(2);
        assert_eq!(game.remove_player(&pid(3)).unwrap_err(), GameError::PlayerNotFound(pid(3)));
    }

    #[test]
    fn test_remove_last_player() {
        let mut game = new_game(1);
        game.remove_player(&pid(0)).unwrap();
        assert!(game.players().is_empty());
        assert_eq!(game.first_free_seat(), Some(Seat::new(0)));
    }

    #[test]
    fn test_remove_current_mid_rotation_keeps_turn() {
        let mut game = started();
        game.next_turn().unwrap();

        game.remove_player(&pid(1)).unwrap();

        assert_eq!(game.current_player(), Some(&pid(2)));
        assert_eq!(game.current_turn(), 1);
        assert_eq!(game.stone_count(), DECK_SIZE);
    }

    #[test]
    fn test_remove_last_seat_wraps_turn() {
        let mut game = started();
        for _ in 0..3 {
            game.next_turn().unwrap();
        }

        game.remove_player(&pid(3)).unwrap();

        assert_eq!(game.current_player(), Some(&pid(0)));
        assert_eq!(game.current_turn(), 2);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.stone_count(), DECK_SIZE);
    }

    #[test]
    fn test_remove_last_seat_on_final_turn() {
        let mut game = started();
        for _ in 0..35 {
            game.next_turn().unwrap();
        }
        assert_eq!(game.current_player(), Some(&pid(3)));
        assert_eq!(game.current_turn(), 9);

        let removed = game.remove_player(&pid(3)).unwrap();

        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(removed.hand_size(), 0);
        assert_eq!(removed.score, 0);
        assert_eq!(game.discards().len(), 14);
        assert_eq!(game.stone_count(), DECK_SIZE);
        assert_eq!(game.players().len(), 3);
        for player in game.players() {
            assert_eq!(player.score, 400);
        }
    }

    #[test]
    fn test_joker_extends_opened_meld() {
        let mut game = started();
        let black = |n| Stone::new(n, StoneColor::Black);
        game.players[0].set_hand(vec![black(7)]);
        game.players[2].set_hand(vec![Stone::joker(), black(2)]);

        let per = game.open_meld(&pid(0), &[black(7)]).unwrap();
        game.add_to_meld(&pid(2), Stone::joker(), per.id()).unwrap();

        let meld = game.meld(per.id()).unwrap();
        assert_eq!(meld.stones(), &[black(7), Stone::joker()]);
        assert_eq!(meld.kind(), MeldKind::SameNumber);
        assert_eq!(
            game.add_to_meld(&pid(2), black(2), per.id()),
            Err(GameError::CannotAccept { meld: per.id(), stone: black(2) })
        );
    }

    #[test]
    fn test_default_extension_matches_first_number() {
        let mut game = started();
        let red = |n| Stone::new(n, StoneColor::Red);
        let blue_ten = Stone::new(10, StoneColor::Blue);
        game.players[0].set_hand(vec![red(10), red(11), red(12), red(13), blue_ten]);
        let per = game.open_meld(&pid(0), &[red(10), red(11), red(12)]).unwrap();

        assert_eq!(
            game.add_to_meld(&pid(0), red(13), per.id()),
            Err(GameError::CannotAccept { meld: per.id(), stone: red(13) })
        );
        game.add_to_meld(&pid(0), blue_ten, per.id()).unwrap();
        assert_eq!(game.meld(per.id()).unwrap().len(), 4);
    }

    #[test]
    fn test_strict_extension_preserves_kind() {
        let mut game = started_with(HugoConfig::default().strict_extension(), 42);
        let red = |n| Stone::new(n, StoneColor::Red);
        let blue_ten = Stone::new(10, StoneColor::Blue);
        game.players[0].set_hand(vec![red(10), red(11), red(12), red(13), blue_ten]);
        let per = game.open_meld(&pid(0), &[red(10), red(11), red(12)]).unwrap();

        assert_eq!(
            game.add_to_meld(&pid(0), blue_ten, per.id()),
            Err(GameError::CannotAccept { meld: per.id(), stone: blue_ten })
        );
        game.add_to_meld(&pid(0), red(13), per.id()).unwrap();

        let meld = game.meld(per.id()).unwrap();
        assert_eq!(meld.len(), 4);
        assert_eq!(meld.kind(), MeldKind::Sequential);
        assert_eq!(game.player(&pid(0)).unwrap().hand(), &[blue_ten]);
    }

    #[test]
    fn test_numbered_okey_round() {
        let config = HugoConfig::default().with_hugo_turns(Vec::new());
        let mut game = (0..)
            .map(|seed| started_with(config.clone(), seed))
            .find(|g| g.indicator().is_some_and(|s| !s.is_joker))
            .unwrap();
        let indicator = game.indicator().unwrap();
        let okey = game.okey_stone().unwrap();

        assert!(!game.is_hugo_turn());
        assert_eq!(okey, Stone::new(next_number(indicator.number), indicator.color));
        assert!(game.is_okey(&okey));
        assert!(!game.is_okey(&Stone::joker()));

        // The numbered okey lengthens a run.
        let color = StoneColor::ALL.into_iter().find(|c| *c != okey.color).unwrap();
        let plain = |n| Stone::new(n, color);
        game.players[0].set_hand(vec![plain(10), plain(11), okey, plain(3), okey]);
        let per = game.open_meld(&pid(0), &[plain(10), plain(11), okey]).unwrap();
        assert_eq!(per.kind(), MeldKind::Sequential);

        for _ in 0..36 {
            game.next_turn().unwrap();
        }

        // Face value of the leftovers plus 100 for the okey still held.
        let expected = plain(3).value() + okey.value() + 100;
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.player(&pid(0)).unwrap().score, i64::from(expected));
        assert_eq!(game.player(&pid(1)).unwrap().score, 400);
    }
}
