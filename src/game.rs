use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::engine;
use crate::{PlayerId, RoomCode};

/// Hex colors assigned to players in join order, wrapping after six.
pub const PLAYER_COLORS: [&str; 6] = [
    "#EF4444", // Red
    "#3B82F6", // Blue
    "#10B981", // Green
    "#F59E0B", // Yellow
    "#8B5CF6", // Purple
    "#EC4899", // Pink
];

/// Players required before a game can start.
pub const MIN_PLAYERS: usize = 2;

/// Maximum display name length, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// One seat in a room. Position 0 is off-board; the first cell is 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub position: u8,
    pub is_ready: bool,
}

impl Player {
    /// Create a player at the start position. Names longer than
    /// `MAX_NAME_LEN` characters are truncated.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        let mut name = name.into();
        if name.chars().count() > MAX_NAME_LEN {
            name = name.chars().take(MAX_NAME_LEN).collect();
        }

        Self {
            id: id.into(),
            name,
            color: color.into(),
            position: 0,
            is_ready: true,
        }
    }
}

/// Room lifecycle. Progression is one-way: waiting, playing, finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::Playing => write!(f, "playing"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Complete shared state of one room. This is the unit of replication:
/// every commit persists and broadcasts the whole snapshot.
///
/// Roster order is join order and doubles as turn order. The roster only
/// grows, and only while waiting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: RoomCode,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub game_status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winner: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_dice_roll: Option<u8>,
    pub board_size: u8,
}

impl GameState {
    /// Fresh room with an empty roster, waiting for players.
    pub fn new(room: impl Into<RoomCode>) -> Self {
        Self {
            id: room.into(),
            players: Vec::new(),
            current_player_index: 0,
            game_status: GameStatus::Waiting,
            winner: None,
            last_dice_roll: None,
            board_size: BOARD_SIZE,
        }
    }

    /// Append a player to the roster.
    ///
    /// Legal only while waiting and while the id is not already seated;
    /// otherwise the operation is ignored and `None` is returned. All
    /// transitions follow this shape: `Some(next)` means commit, `None`
    /// means drop silently.
    pub fn join(&self, player: Player) -> Option<GameState> {
        if self.game_status != GameStatus::Waiting {
            return None;
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return None;
        }

        let mut next = self.clone();
        next.players.push(player);
        Some(next)
    }

    /// Flip the room from waiting to playing.
    ///
    /// Requires at least `MIN_PLAYERS` seated players. The first joiner
    /// moves first; the turn index has pointed at them since creation.
    pub fn start(&self) -> Option<GameState> {
        if self.game_status != GameStatus::Waiting || self.players.len() < MIN_PLAYERS {
            return None;
        }

        let mut next = self.clone();
        next.game_status = GameStatus::Playing;
        Some(next)
    }

    /// Move the current player by `dice_roll` and rotate or finish.
    ///
    /// The roll is recorded even when the move overshoots and the token
    /// stays put. If the move lands on the last cell the game finishes,
    /// the winner is recorded and the turn index stays on them; otherwise
    /// the turn passes to the next seat.
    pub fn take_turn(&self, dice_roll: u8) -> Option<GameState> {
        if self.game_status != GameStatus::Playing || !(1..=6).contains(&dice_roll) {
            return None;
        }
        let mover = self.players.get(self.current_player_index)?;

        let mut next = self.clone();
        next.players[self.current_player_index] = engine::resolve_move(mover, dice_roll);
        next.last_dice_roll = Some(dice_roll);

        match engine::detect_winner(&next.players) {
            Some(winner_id) => {
                next.winner = Some(winner_id);
                next.game_status = GameStatus::Finished;
            }
            None => {
                next.current_player_index =
                    engine::advance_turn(self.current_player_index, next.players.len());
            }
        }

        Some(next)
    }

    /// Player whose turn it is, if the roster is non-empty.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Roster entry for `id`.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Whether the seat at the turn index belongs to `id`.
    pub fn is_players_turn(&self, id: &str) -> bool {
        self.current_player().map(|p| p.id == id).unwrap_or(false)
    }

    /// Roster entry of the winner, for display.
    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.as_deref().and_then(|id| self.player(id))
    }

    /// Color for the next seat, cycling through the palette.
    pub fn next_color(&self) -> &'static str {
        PLAYER_COLORS[self.players.len() % PLAYER_COLORS.len()]
    }

    /// Structural invariants every snapshot must satisfy. Receivers do not
    /// enforce this; it exists for tests and debugging.
    pub fn is_well_formed(&self) -> bool {
        if !self.players.is_empty() && self.current_player_index >= self.players.len() {
            return false;
        }
        if self.players.iter().any(|p| p.position > BOARD_SIZE) {
            return false;
        }
        if let Some(roll) = self.last_dice_roll {
            if !(1..=6).contains(&roll) {
                return false;
            }
        }

        match self.game_status {
            GameStatus::Waiting => self.winner.is_none(),
            GameStatus::Playing => self.players.len() >= MIN_PLAYERS && self.winner.is_none(),
            GameStatus::Finished => match &self.winner {
                Some(id) => self
                    .player(id)
                    .map(|p| p.position == BOARD_SIZE)
                    .unwrap_or(false),
                None => false,
            },
        }
    }
}
