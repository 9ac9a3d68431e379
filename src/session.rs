use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PlayerId;

/// A client's identity within a room: the stable opaque id issued by the
/// session layer plus the display name entered in the lobby. Authentication
/// itself happens outside this crate; whoever holds the id is the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub player_id: PlayerId,
    pub name: String,
}

impl Identity {
    pub fn new(player_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
        }
    }

    /// Mint an identity with a random id, for clients without a prior
    /// session.
    pub fn generate(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name)
    }
}
