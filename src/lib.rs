// Ladders Game Core - Module Organization
//
// Replicated snakes-and-ladders state machine: a pure turn engine and game
// aggregate, synchronized across clients by persisting and broadcasting
// whole snapshots with last-write-wins reconciliation.

// Core game rules and state
pub mod actions;
pub mod board;
pub mod engine;
pub mod game;

// Replication over abstract transports
pub mod errors;
pub mod memory;
pub mod replication;

// Per-client surface
pub mod client;
pub mod session;

// Re-export common types for convenient access
pub use crate::actions::{permitted, GameAction};
pub use crate::board::{grid_coordinates, resolve_teleport, SnakeOrLadder, TeleportKind, BOARD_SIZE};
pub use crate::client::RoomClient;
pub use crate::errors::{SyncError, SyncResult};
pub use crate::game::{GameState, GameStatus, Player, MAX_NAME_LEN, MIN_PLAYERS, PLAYER_COLORS};
pub use crate::memory::{MemoryBroadcastChannel, MemoryRoomStore};
pub use crate::replication::{room_topic, BroadcastChannel, Replicator, RoomStore, SnapshotStream};
pub use crate::session::Identity;

// Common types used throughout the crate
pub type PlayerId = String;
pub type RoomCode = String;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
