use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::SyncResult;
use crate::game::GameState;
use crate::RoomCode;

/// Stream of snapshots observed on a room topic. Dropping the stream ends
/// the subscription.
pub type SnapshotStream = BoxStream<'static, GameState>;

/// Keyed snapshot persistence: one record per room code, whole-snapshot
/// upsert on every write. The store is a recovery backstop for clients
/// binding late, not an arbiter; it keeps whichever write landed last.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn put(&self, room: &str, snapshot: &GameState) -> SyncResult<()>;
    async fn get(&self, room: &str) -> SyncResult<Option<GameState>>;
}

/// Topic-based snapshot fan-out.
///
/// Delivery is at-least-once to every current subscriber, including the
/// publisher itself. Nothing orders snapshots from different publishers;
/// receivers reconcile by last write wins.
#[async_trait]
pub trait BroadcastChannel: Send + Sync {
    async fn publish(&self, topic: &str, snapshot: &GameState) -> SyncResult<()>;
    async fn subscribe(&self, topic: &str) -> SyncResult<SnapshotStream>;
}

/// Topic carrying all snapshot traffic for a room.
pub fn room_topic(room: &str) -> String {
    format!("game-{}", room)
}

/// Store and channel pair bound to one room.
///
/// `commit` is the only write path: persist the snapshot, then publish it.
/// The committing client does not update its own view here; it waits for
/// the broadcast echo like every other subscriber, so all clients apply
/// state through the same code path.
#[derive(Clone)]
pub struct Replicator {
    store: Arc<dyn RoomStore>,
    channel: Arc<dyn BroadcastChannel>,
    room: RoomCode,
}

impl Replicator {
    pub fn new(
        store: Arc<dyn RoomStore>,
        channel: Arc<dyn BroadcastChannel>,
        room: impl Into<RoomCode>,
    ) -> Self {
        Self {
            store,
            channel,
            room: room.into(),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Persist `snapshot`, then broadcast it to the room topic.
    ///
    /// If the publish fails after a successful put, the store leads the
    /// channel until the next commit; there is no rollback and no retry.
    pub async fn commit(&self, snapshot: &GameState) -> SyncResult<()> {
        if let Err(e) = self.store.put(&self.room, snapshot).await {
            log::error!("Persist failed for room {}: {}", self.room, e);
            return Err(e);
        }

        if let Err(e) = self.channel.publish(&room_topic(&self.room), snapshot).await {
            log::error!("Publish failed after persisting room {}: {}", self.room, e);
            return Err(e);
        }

        Ok(())
    }

    /// Read the stored snapshot for this room.
    pub async fn fetch(&self) -> SyncResult<Option<GameState>> {
        self.store.get(&self.room).await
    }

    /// Subscribe to snapshots committed by any client of this room.
    pub async fn updates(&self) -> SyncResult<SnapshotStream> {
        self.channel.subscribe(&room_topic(&self.room)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SyncError;
    use crate::game::Player;
    use crate::memory::{MemoryBroadcastChannel, MemoryRoomStore};
    use crate::PLAYER_COLORS;
    use futures::StreamExt;
    use std::time::Duration;

    fn snapshot(room: &str) -> GameState {
        let state = GameState::new(room);
        state
            .join(Player::new("alice", "Alice", PLAYER_COLORS[0]))
            .unwrap()
    }

    struct OfflineStore;

    #[async_trait]
    impl RoomStore for OfflineStore {
        async fn put(&self, _room: &str, _snapshot: &GameState) -> SyncResult<()> {
            Err(SyncError::store("store offline"))
        }

        async fn get(&self, _room: &str) -> SyncResult<Option<GameState>> {
            Err(SyncError::store("store offline"))
        }
    }

    #[test]
    fn test_room_topic_format() {
        assert_eq!(room_topic("ABC123"), "game-ABC123");
    }

    #[tokio::test]
    async fn test_commit_persists_and_publishes() {
        let store: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::new());
        let channel: Arc<dyn BroadcastChannel> = Arc::new(MemoryBroadcastChannel::new());
        let replicator = Replicator::new(store, channel, "R1");

        let mut updates = replicator.updates().await.unwrap();
        let state = snapshot("R1");
        replicator.commit(&state).await.unwrap();

        assert_eq!(replicator.fetch().await.unwrap(), Some(state.clone()));
        assert_eq!(updates.next().await, Some(state));
    }

    #[tokio::test]
    async fn test_fetch_unknown_room_is_none() {
        let store: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::new());
        let channel: Arc<dyn BroadcastChannel> = Arc::new(MemoryBroadcastChannel::new());
        let replicator = Replicator::new(store, channel, "NOWHERE");

        assert_eq!(replicator.fetch().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_put_surfaces_error_and_publishes_nothing() {
        let store: Arc<dyn RoomStore> = Arc::new(OfflineStore);
        let channel: Arc<dyn BroadcastChannel> = Arc::new(MemoryBroadcastChannel::new());
        let replicator = Replicator::new(store, channel, "R3");

        let mut updates = replicator.updates().await.unwrap();
        let err = replicator.commit(&snapshot("R3")).await.unwrap_err();
        assert!(matches!(err, SyncError::Store { .. }));

        let waited = tokio::time::timeout(Duration::from_millis(50), updates.next()).await;
        assert!(waited.is_err(), "snapshot published despite failed persist");
    }

    #[tokio::test]
    async fn test_commit_reaches_other_room_clients() {
        let store: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::new());
        let channel: Arc<dyn BroadcastChannel> = Arc::new(MemoryBroadcastChannel::new());
        let writer = Replicator::new(store.clone(), channel.clone(), "R2");
        let reader = Replicator::new(store, channel, "R2");

        let mut updates = reader.updates().await.unwrap();
        let state = snapshot("R2");
        writer.commit(&state).await.unwrap();

        assert_eq!(updates.next().await, Some(state));
    }
}
