use serde::{Deserialize, Serialize};

use crate::game::{GameState, GameStatus, MIN_PLAYERS};

/// Actions a client can attempt against its room. The actor is always the
/// bound session's player id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    /// Take a seat in the roster.
    Join,
    /// Begin play once enough players are seated.
    Start,
    /// Move the actor's token by a die face.
    Roll { dice_roll: u8 },
}

/// Decide whether `actor` may apply `action` to `state`.
///
/// A denied action is dropped silently, never surfaced as an error. The
/// guard runs on the acting client only; receivers apply whatever snapshot
/// arrives without re-checking, so this is defense against local bugs, not
/// against a misbehaving peer.
pub fn permitted(state: &GameState, actor: &str, action: &GameAction) -> bool {
    match action {
        GameAction::Join => {
            state.game_status == GameStatus::Waiting && state.player(actor).is_none()
        }
        GameAction::Start => {
            state.game_status == GameStatus::Waiting && state.players.len() >= MIN_PLAYERS
        }
        GameAction::Roll { dice_roll } => {
            state.game_status == GameStatus::Playing
                && (1..=6).contains(dice_roll)
                && state.is_players_turn(actor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn room_with(player_ids: &[&str]) -> GameState {
        let mut state = GameState::new("GUARD1");
        for id in player_ids {
            let color = state.next_color();
            state = state.join(Player::new(*id, *id, color)).unwrap();
        }
        state
    }

    #[test]
    fn test_join_permitted_for_new_player_while_waiting() {
        let state = room_with(&["alice"]);
        assert!(permitted(&state, "bob", &GameAction::Join));
        assert!(!permitted(&state, "alice", &GameAction::Join));

        let playing = room_with(&["alice", "bob"]).start().unwrap();
        assert!(!permitted(&playing, "carol", &GameAction::Join));
    }

    #[test]
    fn test_start_needs_quorum_and_waiting_status() {
        assert!(!permitted(&room_with(&["alice"]), "alice", &GameAction::Start));

        let ready = room_with(&["alice", "bob"]);
        // Starting is not restricted to a particular seat
        assert!(permitted(&ready, "alice", &GameAction::Start));
        assert!(permitted(&ready, "bob", &GameAction::Start));

        let playing = ready.start().unwrap();
        assert!(!permitted(&playing, "alice", &GameAction::Start));
    }

    #[test]
    fn test_roll_only_for_current_player_in_playing_room() {
        let waiting = room_with(&["alice", "bob"]);
        let roll = GameAction::Roll { dice_roll: 3 };
        assert!(!permitted(&waiting, "alice", &roll));

        let playing = waiting.start().unwrap();
        assert!(permitted(&playing, "alice", &roll));
        assert!(!permitted(&playing, "bob", &roll));

        let next = playing.take_turn(3).unwrap();
        assert!(permitted(&next, "bob", &roll));
        assert!(!permitted(&next, "alice", &roll));
    }

    #[test]
    fn test_roll_rejects_out_of_range_faces() {
        let playing = room_with(&["alice", "bob"]).start().unwrap();
        assert!(!permitted(&playing, "alice", &GameAction::Roll { dice_roll: 0 }));
        assert!(!permitted(&playing, "alice", &GameAction::Roll { dice_roll: 7 }));
    }
}
