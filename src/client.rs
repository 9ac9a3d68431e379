use std::sync::Arc;

use futures::StreamExt;

use crate::actions::{self, GameAction};
use crate::engine;
use crate::errors::SyncResult;
use crate::game::{GameState, GameStatus, Player, PLAYER_COLORS};
use crate::replication::{BroadcastChannel, Replicator, RoomStore, SnapshotStream};
use crate::session::Identity;
use crate::RoomCode;

/// One client's live view of a room.
///
/// The client keeps the last snapshot it has seen and derives everything
/// else (whose turn it is, the winner) from it. Mutations are committed
/// through the replicator and come back as broadcast echoes: committing
/// never touches the local snapshot, only `next_update` does.
pub struct RoomClient {
    identity: Identity,
    replicator: Replicator,
    updates: SnapshotStream,
    state: GameState,
}

impl RoomClient {
    /// Bind `identity` to `room`, creating the room if no snapshot exists
    /// yet or taking a seat in one that is still waiting.
    ///
    /// The subscription opens before the first read so no snapshot
    /// published in between is missed. The read-then-write join races with
    /// other clients binding to the same room: two concurrent joiners can
    /// each append to the roster they read, and whichever commit lands last
    /// overwrites the other. The losing join surfaces again only if that
    /// client rebinds.
    pub async fn bind(
        store: Arc<dyn RoomStore>,
        channel: Arc<dyn BroadcastChannel>,
        identity: Identity,
        room: impl Into<RoomCode>,
    ) -> SyncResult<RoomClient> {
        let replicator = Replicator::new(store, channel, room);
        let updates = replicator.updates().await?;

        let state = match replicator.fetch().await? {
            Some(existing) => {
                if existing.player(&identity.player_id).is_some() {
                    log::info!(
                        "{} rebound to room {}",
                        identity.player_id,
                        replicator.room()
                    );
                    existing
                } else {
                    let player = Player::new(
                        identity.player_id.clone(),
                        identity.name.clone(),
                        existing.next_color(),
                    );
                    match existing.join(player) {
                        Some(joined) => {
                            replicator.commit(&joined).await?;
                            log::info!("👋 {} joined room {}", identity.name, replicator.room());
                            joined
                        }
                        None => {
                            // Game already underway; watch without a seat.
                            log::info!(
                                "Room {} is {}; {} binds as observer",
                                replicator.room(),
                                existing.game_status,
                                identity.player_id
                            );
                            existing
                        }
                    }
                }
            }
            None => {
                let mut created = GameState::new(replicator.room());
                created.players.push(Player::new(
                    identity.player_id.clone(),
                    identity.name.clone(),
                    PLAYER_COLORS[0],
                ));
                replicator.commit(&created).await?;
                log::info!("🎲 {} created room {}", identity.name, replicator.room());
                created
            }
        };

        Ok(RoomClient {
            identity,
            replicator,
            updates,
            state,
        })
    }

    /// Last snapshot this client has seen.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn room(&self) -> &str {
        self.replicator.room()
    }

    /// Whether the local snapshot puts this client at the turn index.
    pub fn is_my_turn(&self) -> bool {
        self.state.is_players_turn(&self.identity.player_id)
    }

    /// Flip the room to playing. `Ok(false)` means the guard denied the
    /// action and nothing was committed.
    pub async fn start_game(&self) -> SyncResult<bool> {
        if !actions::permitted(&self.state, &self.identity.player_id, &GameAction::Start) {
            return Ok(false);
        }

        let next = match self.state.start() {
            Some(next) => next,
            None => return Ok(false),
        };
        self.replicator.commit(&next).await?;
        Ok(true)
    }

    /// Sample a die locally and submit the move. Returns the rolled face,
    /// or `None` if the guard denied the roll.
    pub async fn roll_dice(&self) -> SyncResult<Option<u8>> {
        let roll = engine::roll_dice(&mut rand::thread_rng());
        if self.submit_roll(roll).await? {
            Ok(Some(roll))
        } else {
            Ok(None)
        }
    }

    /// Submit a specific die face as this client's move.
    ///
    /// The move is validated against the local snapshot only; a stale view
    /// can commit over another client's turn and the room converges on
    /// whichever snapshot was written last. On success the local snapshot
    /// stays as it was; the new state arrives through `next_update` like
    /// every other client's.
    pub async fn submit_roll(&self, dice_roll: u8) -> SyncResult<bool> {
        let action = GameAction::Roll { dice_roll };
        if !actions::permitted(&self.state, &self.identity.player_id, &action) {
            log::debug!(
                "Dropping roll {} from {}: not permitted",
                dice_roll,
                self.identity.player_id
            );
            return Ok(false);
        }

        let next = match self.state.take_turn(dice_roll) {
            Some(next) => next,
            None => return Ok(false),
        };
        self.replicator.commit(&next).await?;
        Ok(true)
    }

    /// Wait for the next snapshot on the room topic and adopt it.
    ///
    /// Adoption is unconditional: the received snapshot replaces the local
    /// one even if it is older or loses local progress. Returns `None` when
    /// the subscription has ended.
    pub async fn next_update(&mut self) -> Option<GameState> {
        let snapshot = self.updates.next().await?;

        if snapshot.game_status == GameStatus::Finished
            && self.state.game_status != GameStatus::Finished
        {
            if let Some(winner) = snapshot.winner_player() {
                log::info!("🏆 Room {}: {} wins", self.replicator.room(), winner.name);
            }
        }

        self.state = snapshot;
        Some(self.state.clone())
    }
}
