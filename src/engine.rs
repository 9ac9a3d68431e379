use rand::Rng;

use crate::board::{self, BOARD_SIZE};
use crate::game::Player;
use crate::PlayerId;

/// Apply a dice roll to a player and return the moved copy.
///
/// A roll that would carry the token past the last cell is a no-op: the
/// player keeps their position and the roll is forfeited. Otherwise the
/// token advances and follows at most one snake or ladder from the cell
/// it landed on.
pub fn resolve_move(player: &Player, dice_roll: u8) -> Player {
    let target = player.position as u16 + dice_roll as u16;
    if target > BOARD_SIZE as u16 {
        return player.clone();
    }

    let landed = target as u8;
    let mut moved = player.clone();
    moved.position = board::resolve_teleport(landed).unwrap_or(landed);
    moved
}

/// Id of the first player sitting on the last cell, if any.
///
/// List order breaks ties, though only one token moves per turn so two
/// players cannot reach the last cell in the same transition.
pub fn detect_winner(players: &[Player]) -> Option<PlayerId> {
    players
        .iter()
        .find(|p| p.position == BOARD_SIZE)
        .map(|p| p.id.clone())
}

/// Index of the next player in rotation. Callers guarantee a non-empty
/// roster.
pub fn advance_turn(current_index: usize, player_count: usize) -> usize {
    (current_index + 1) % player_count
}

/// Sample a die face, uniform in 1..=6.
pub fn roll_dice(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=6)
}
