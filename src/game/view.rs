//! Read-only views of a game for the caller to broadcast.
//!
//! - `TableView`: what every seat may see
//! - `PlayerView`: one seat's private view (own hand included)

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameResult, MeldId, Player, PlayerId, RoomId, Seat, Stone};
use crate::melds::{MeldKind, Per};

use super::state::{Game, GameStatus};

/// Public summary of a seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub id: PlayerId,
    pub name: String,
    pub seat: Seat,
    pub hand_size: usize,
    pub score: i64,
    pub has_opened_hand: bool,
    pub last_thrown_stone: Option<Stone>,
}

impl From<&Player> for SeatSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            seat: player.seat,
            hand_size: player.hand_size(),
            score: player.score,
            has_opened_hand: player.has_opened_hand,
            last_thrown_stone: player.last_thrown_stone,
        }
    }
}

/// An opened meld as shown on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldView {
    pub id: MeldId,
    pub owner: PlayerId,
    pub stones: Vec<Stone>,
    pub kind: MeldKind,
    pub value: u32,
}

impl From<&Per> for MeldView {
    fn from(per: &Per) -> Self {
        Self {
            id: per.id(),
            owner: per.owner().clone(),
            stones: per.stones().to_vec(),
            kind: per.kind(),
            value: per.value(),
        }
    }
}

/// Public state of a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub room: RoomId,
    pub status: GameStatus,
    pub current_turn: u32,
    pub is_hugo_turn: bool,
    pub current_player: Option<PlayerId>,
    pub remaining_stones: usize,
    pub indicator: Option<Stone>,
    pub okey: Option<Stone>,
    pub melds: Vec<MeldView>,
    pub top_discard: Option<Stone>,
    pub players: Vec<SeatSummary>,
}

/// One seat's view of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub your_stones: Vec<Stone>,
    pub position: Seat,
    pub indicator: Option<Stone>,
    pub okey: Option<Stone>,
    /// Okey tiles currently in this hand.
    pub okey_in_hand: usize,
    pub remaining_stones: usize,
    pub current_player: Option<PlayerId>,
    pub is_game_started: bool,
    pub current_turn: u32,
    pub is_hugo_turn: bool,
    pub other_players: Vec<SeatSummary>,
}

impl Game {
    /// Build the public table view.
    #[must_use]
    pub fn table_view(&self) -> TableView {
        TableView {
            room: self.id().clone(),
            status: self.status(),
            current_turn: self.current_turn(),
            is_hugo_turn: self.is_hugo_turn(),
            current_player: self.current_player().cloned(),
            remaining_stones: self.deck().len(),
            indicator: self.indicator(),
            okey: self.okey_stone(),
            melds: self.opened_melds().iter().map(MeldView::from).collect(),
            top_discard: self.discards().back().copied(),
            players: self.players().iter().map(SeatSummary::from).collect(),
        }
    }

    /// Build a seat's private view.
    pub fn player_view(&self, id: &PlayerId) -> GameResult<PlayerView> {
        let me = self
            .player(id)
            .ok_or_else(|| GameError::PlayerNotFound(id.clone()))?;

        Ok(PlayerView {
            your_stones: me.hand().to_vec(),
            position: me.seat,
            indicator: self.indicator(),
            okey: self.okey_stone(),
            okey_in_hand: me.hand().iter().filter(|s| self.is_okey(s)).count(),
            remaining_stones: self.deck().len(),
            current_player: self.current_player().cloned(),
            is_game_started: self.status() != GameStatus::WaitingToStart,
            current_turn: self.current_turn(),
            is_hugo_turn: self.is_hugo_turn(),
            other_players: self
                .players()
                .iter()
                .filter(|p| &p.id != id)
                .map(SeatSummary::from)
                .collect(),
        })
    }
}
