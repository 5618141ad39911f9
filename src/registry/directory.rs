//! Session registry: room id -> `Game`.
//!
//! ## Locking
//!
//! - The room map sits behind an `RwLock` that is held only long enough to
//!   look up, insert or remove a handle.
//! - Each game sits behind its own `Mutex`. An operation locks exactly one
//!   room for its whole duration, so a throw and the turn advance it causes
//!   are never observed separately.
//! - Lock order is always map, then room. Nothing takes the map lock while
//!   holding a room lock.
//!
//! ## Usage
//!
//! ```
//! use hugo_okey::core::{HugoConfig, Player, PlayerId, RoomId, Seat};
//! use hugo_okey::registry::GameDirectory;
//!
//! let directory = GameDirectory::new(HugoConfig::default().with_seed(42)).unwrap();
//! let room = RoomId::from("table-1");
//!
//! let players = ["Ayse", "Bora", "Cem", "Deniz"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, name)| Player::new(format!("p{}", i).as_str(), *name, Seat::new(i as u8)))
//!     .collect();
//! directory.create_game(room.clone(), players).unwrap();
//!
//! let table = directory.start(&room).unwrap();
//! assert_eq!(table.remaining_stones, 48);
//!
//! let stone = directory.draw_stone(&room, &PlayerId::from("p0")).unwrap();
//! directory.throw_stone(&room, &PlayerId::from("p0"), stone).unwrap();
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument, warn};

use crate::core::{
    GameError, GameResult, GameRng, HugoConfig, MeldId, Player, PlayerId, RoomId, Seat, Stone,
};
use crate::game::{Game, PlayerView, TableView};
use crate::melds::Per;

/// Shared handle to one room's game.
///
/// Cloning the handle does not clone the game.
#[derive(Clone, Debug)]
pub struct GameHandle {
    room: RoomId,
    game: Arc<Mutex<Game>>,
}

impl GameHandle {
    fn new(room: RoomId, game: Game) -> Self {
        Self {
            room,
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// Room this handle belongs to.
    #[must_use]
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Run `f` with exclusive access to the game.
    pub fn with<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.lock())
    }

    /// Run `f` against the game under the room lock.
    pub fn read<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.lock())
    }

    /// Copy of the whole game, taken under the room lock.
    #[must_use]
    pub fn snapshot(&self) -> Game {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Game> {
        // Game operations never panic part-way through a mutation, so a
        // poisoned lock still guards a consistent game.
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn same_game(&self, other: &GameHandle) -> bool {
        Arc::ptr_eq(&self.game, &other.game)
    }
}

/// What happened to the room after a player left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatVacated {
    /// Other players are still seated.
    RoomOpen,
    /// The last seat emptied and the room was removed.
    RoomClosed,
}

/// Registry of all rooms in the process.
///
/// Construct one at startup and hand it (by reference or `Arc`) to the
/// transport layer.
#[derive(Debug)]
pub struct GameDirectory {
    config: HugoConfig,
    rooms: RwLock<FxHashMap<RoomId, GameHandle>>,
    rng: Mutex<GameRng>,
}

impl GameDirectory {
    /// Create a directory. Seeds from `config.seed` or OS entropy.
    pub fn new(config: HugoConfig) -> GameResult<Self> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::with_rng(config, rng)
    }

    /// Create a directory with an explicit root RNG.
    pub fn with_rng(config: HugoConfig, rng: GameRng) -> GameResult<Self> {
        config.validate()?;
        info!(seed = rng.seed(), "Creating game directory");
        Ok(Self {
            config,
            rooms: RwLock::new(FxHashMap::default()),
            rng: Mutex::new(rng),
        })
    }

    /// Rules applied to every new game.
    #[must_use]
    pub fn config(&self) -> &HugoConfig {
        &self.config
    }

    // === Rooms ===

    /// Allocate a room id not currently in use.
    pub fn allocate_room_id(&self) -> RoomId {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            let id = RoomId::new(format!("{:016x}", rng.next_u64()));
            if !rooms.contains_key(&id) {
                return id;
            }
        }
    }

    /// Create a game for `room` with the given players.
    #[instrument(skip(self, players), fields(room = %room, seated = players.len()))]
    pub fn create_game(&self, room: RoomId, players: Vec<Player>) -> GameResult<GameHandle> {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        if rooms.contains_key(&room) {
            warn!("Room already has a game");
            return Err(GameError::RoomExists(room));
        }

        let mut game_rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner).fork();
        let game = Game::new(room.clone(), players, self.config.clone(), &mut game_rng)?;

        let handle = GameHandle::new(room.clone(), game);
        rooms.insert(room, handle.clone());
        info!(rooms = rooms.len(), "Game created");
        Ok(handle)
    }

    /// Create a game in a freshly allocated room.
    pub fn create_room(&self, players: Vec<Player>) -> GameResult<GameHandle> {
        loop {
            let room = self.allocate_room_id();
            match self.create_game(room, players.clone()) {
                Err(GameError::RoomExists(_)) => continue,
                result => return result,
            }
        }
    }

    /// Look up a room's game.
    #[must_use]
    pub fn get_game(&self, room: &RoomId) -> Option<GameHandle> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        rooms.get(room).cloned()
    }

    /// Drop a room. Returns false if it did not exist.
    #[instrument(skip(self))]
    pub fn remove_game(&self, room: &RoomId) -> bool {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let removed = rooms.remove(room).is_some();
        if removed {
            info!(rooms = rooms.len(), "Room removed");
        }
        removed
    }

    /// Number of live rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Ids of all live rooms.
    #[must_use]
    pub fn room_ids(&self) -> Vec<RoomId> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        rooms.keys().cloned().collect()
    }

    // === Seating ===

    /// Seat a player at an explicit seat.
    #[instrument(skip(self, player), fields(player = %player.id, seat = %player.seat))]
    pub fn add_player(&self, room: &RoomId, player: Player) -> GameResult<()> {
        self.handle(room)?.with(|game| game.add_player(player))
    }

    /// Seat a player at the first free seat.
    #[instrument(skip(self, name))]
    pub fn join(&self, room: &RoomId, id: PlayerId, name: impl Into<String>) -> GameResult<Seat> {
        let name = name.into();
        self.handle(room)?.with(|game| {
            let seat = game
                .first_free_seat()
                .ok_or_else(|| GameError::invalid_state("the table is full"))?;
            game.add_player(Player::new(id, name, seat))?;
            Ok(seat)
        })
    }

    /// Vacate a seat, removing the room when it empties.
    #[instrument(skip(self))]
    pub fn remove_player(&self, room: &RoomId, player: &PlayerId) -> GameResult<SeatVacated> {
        let handle = self.handle(room)?;
        let now_empty = handle.with(|game| {
            game.remove_player(player)?;
            Ok::<_, GameError>(game.players().is_empty())
        })?;

        if !now_empty {
            return Ok(SeatVacated::RoomOpen);
        }

        // Someone may have joined between the two locks.
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let still_empty = rooms.get(room).is_some_and(|current| {
            current.same_game(&handle) && current.read(|g| g.players().is_empty())
        });
        if still_empty {
            rooms.remove(room);
            info!(rooms = rooms.len(), "Last seat emptied, room closed");
            Ok(SeatVacated::RoomClosed)
        } else {
            Ok(SeatVacated::RoomOpen)
        }
    }

    // === Play ===

    /// Start a room's game and return the table as dealt.
    #[instrument(skip(self))]
    pub fn start(&self, room: &RoomId) -> GameResult<TableView> {
        self.handle(room)?.with(|game| {
            game.start()?;
            Ok(game.table_view())
        })
    }

    /// Draw for the current player.
    #[instrument(skip(self))]
    pub fn draw_stone(&self, room: &RoomId, player: &PlayerId) -> GameResult<Stone> {
        self.handle(room)?.with(|game| game.draw_stone(player))
    }

    /// Throw a stone and pass the turn, as one locked step.
    #[instrument(skip(self), fields(stone = %stone))]
    pub fn throw_stone(&self, room: &RoomId, player: &PlayerId, stone: Stone) -> GameResult<()> {
        self.handle(room)?.with(|game| game.throw_stone(player, stone))
    }

    /// Open a meld from a player's hand.
    #[instrument(skip(self, stones), fields(stones = stones.len()))]
    pub fn open_meld(&self, room: &RoomId, player: &PlayerId, stones: &[Stone]) -> GameResult<Per> {
        self.handle(room)?.with(|game| game.open_meld(player, stones))
    }

    /// Add a stone from a player's hand to an opened meld.
    #[instrument(skip(self), fields(stone = %stone, meld = %meld))]
    pub fn add_to_meld(
        &self,
        room: &RoomId,
        player: &PlayerId,
        stone: Stone,
        meld: MeldId,
    ) -> GameResult<()> {
        self.handle(room)?.with(|game| game.add_to_meld(player, stone, meld))
    }

    // === Views ===

    /// Public view of a room.
    pub fn table_view(&self, room: &RoomId) -> GameResult<TableView> {
        Ok(self.handle(room)?.read(Game::table_view))
    }

    /// One seat's private view of a room.
    pub fn player_view(&self, room: &RoomId, player: &PlayerId) -> GameResult<PlayerView> {
        self.handle(room)?.read(|game| game.player_view(player))
    }

    fn handle(&self, room: &RoomId) -> GameResult<GameHandle> {
        self.get_game(room).ok_or_else(|| {
            debug!(room = %room, "Room not found");
            GameError::GameNotFound(room.clone())
        })
    }
}
