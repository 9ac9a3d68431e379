use std::collections::HashMap;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::{broadcast, RwLock};
use tokio_stream::wrappers::BroadcastStream;

use crate::errors::SyncResult;
use crate::game::GameState;
use crate::replication::{BroadcastChannel, RoomStore, SnapshotStream};

/// Per-topic buffer size. A subscriber that falls further behind than this
/// skips ahead to newer snapshots, which last-write-wins absorbs anyway.
const CHANNEL_CAPACITY: usize = 1000;

/// In-memory room store for tests and simulation. Snapshots are kept as
/// JSON documents so they cross the same codec as a persistent store.
#[derive(Default)]
pub struct MemoryRoomStore {
    rooms: RwLock<HashMap<String, String>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn put(&self, room: &str, snapshot: &GameState) -> SyncResult<()> {
        let doc = serde_json::to_string(snapshot)?;
        let mut rooms = self.rooms.write().await;
        rooms.insert(room.to_string(), doc);
        Ok(())
    }

    async fn get(&self, room: &str) -> SyncResult<Option<GameState>> {
        let rooms = self.rooms.read().await;
        match rooms.get(room) {
            Some(doc) => Ok(Some(serde_json::from_str(doc)?)),
            None => Ok(None),
        }
    }
}

/// In-memory pub/sub built on one tokio broadcast channel per topic.
#[derive(Default)]
pub struct MemoryBroadcastChannel {
    topics: RwLock<HashMap<String, broadcast::Sender<GameState>>>,
}

impl MemoryBroadcastChannel {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sender(&self, topic: &str) -> broadcast::Sender<GameState> {
        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl BroadcastChannel for MemoryBroadcastChannel {
    async fn publish(&self, topic: &str, snapshot: &GameState) -> SyncResult<()> {
        let sender = self.sender(topic).await;
        // A publish with no subscribers is fine, the snapshot just goes
        // unobserved.
        let _ = sender.send(snapshot.clone());
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> SyncResult<SnapshotStream> {
        let receiver = self.sender(topic).await.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|item| async move { item.ok() });
        Ok(Box::pin(stream))
    }
}
