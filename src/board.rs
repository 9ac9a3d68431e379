use serde::{Deserialize, Serialize};

/// Number of cells on the track. Tokens start off-board at position 0 and
/// win by landing exactly on the last cell.
pub const BOARD_SIZE: u8 = 100;

/// Side length of the square grid used for display coordinates.
const GRID_DIM: u8 = 10;

/// Whether a teleport helps or hurts the player who lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeleportKind {
    Ladder,
    Snake,
}

/// A single teleport link: a token landing on `start` moves to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeOrLadder {
    pub start: u8,
    pub end: u8,
    #[serde(rename = "type")]
    pub kind: TeleportKind,
}

/// The fixed board layout: 8 ladders (end above start) and 8 snakes (end
/// below start). Start cells are pairwise distinct and no end cell is
/// itself a start, so a move applies at most one teleport.
pub const SNAKES_AND_LADDERS: [SnakeOrLadder; 16] = [
    // Ladders
    SnakeOrLadder { start: 4, end: 14, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 9, end: 31, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 20, end: 38, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 28, end: 84, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 40, end: 59, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 51, end: 67, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 63, end: 81, kind: TeleportKind::Ladder },
    SnakeOrLadder { start: 71, end: 91, kind: TeleportKind::Ladder },
    // Snakes
    SnakeOrLadder { start: 17, end: 7, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 54, end: 34, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 62, end: 19, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 64, end: 60, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 87, end: 24, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 93, end: 73, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 95, end: 75, kind: TeleportKind::Snake },
    SnakeOrLadder { start: 99, end: 78, kind: TeleportKind::Snake },
];

/// Destination of the teleport starting at `cell`, if any.
pub fn resolve_teleport(cell: u8) -> Option<u8> {
    SNAKES_AND_LADDERS
        .iter()
        .find(|t| t.start == cell)
        .map(|t| t.end)
}

/// The full teleport table, for display layers.
pub fn teleports() -> &'static [SnakeOrLadder] {
    &SNAKES_AND_LADDERS
}

/// Map a track position to `(row, col)` on the 10x10 display grid.
///
/// Cell 1 sits at the bottom-left corner (row 9, col 0) and the track snakes
/// upward, reversing direction every row, ending with cell 100 at the
/// top-left. Position 0 (off-board) is drawn at the cell 1 corner; positions
/// past the last cell clamp to it, so any u8 yields an on-grid coordinate.
pub fn grid_coordinates(position: u8) -> (u8, u8) {
    if position == 0 {
        return (GRID_DIM - 1, 0);
    }
    let position = position.min(BOARD_SIZE);

    // Rows counted from the bottom; odd ones run right to left.
    let band = (position - 1) / GRID_DIM;
    let row = GRID_DIM - 1 - band;
    let col = (position - 1) % GRID_DIM;

    if band % 2 == 1 {
        (row, GRID_DIM - 1 - col)
    } else {
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_teleport_table_in_bounds() {
        for t in teleports() {
            assert!(t.start >= 1 && t.start <= BOARD_SIZE, "start {} out of bounds", t.start);
            assert!(t.end >= 1 && t.end <= BOARD_SIZE, "end {} out of bounds", t.end);
        }
    }

    #[test]
    fn test_teleport_starts_distinct() {
        let starts: HashSet<u8> = teleports().iter().map(|t| t.start).collect();
        assert_eq!(starts.len(), SNAKES_AND_LADDERS.len());
    }

    #[test]
    fn test_no_chained_teleports() {
        let starts: HashSet<u8> = teleports().iter().map(|t| t.start).collect();
        for t in teleports() {
            assert!(!starts.contains(&t.end), "teleport end {} is itself a start", t.end);
        }
    }

    #[test]
    fn test_ladders_ascend_snakes_descend() {
        for t in teleports() {
            match t.kind {
                TeleportKind::Ladder => assert!(t.end > t.start),
                TeleportKind::Snake => assert!(t.end < t.start),
            }
        }
    }

    #[test]
    fn test_resolve_teleport_matches_table() {
        assert_eq!(resolve_teleport(4), Some(14));
        assert_eq!(resolve_teleport(28), Some(84));
        assert_eq!(resolve_teleport(62), Some(19));
        assert_eq!(resolve_teleport(99), Some(78));
        assert_eq!(resolve_teleport(1), None);
        assert_eq!(resolve_teleport(5), None);
        assert_eq!(resolve_teleport(100), None);
    }

    #[test]
    fn test_grid_corners() {
        assert_eq!(grid_coordinates(1), (9, 0));
        assert_eq!(grid_coordinates(10), (9, 9));
        assert_eq!(grid_coordinates(11), (8, 9));
        assert_eq!(grid_coordinates(20), (8, 0));
        assert_eq!(grid_coordinates(21), (7, 0));
        assert_eq!(grid_coordinates(91), (0, 9));
        assert_eq!(grid_coordinates(100), (0, 0));
    }

    #[test]
    fn test_grid_start_position_at_cell_one_corner() {
        assert_eq!(grid_coordinates(0), grid_coordinates(1));
    }

    #[test]
    fn test_grid_positions_past_last_cell_clamp() {
        assert_eq!(grid_coordinates(101), grid_coordinates(100));
        assert_eq!(grid_coordinates(u8::MAX), (0, 0));
    }

    #[test]
    fn test_grid_cells_unique_and_boustrophedon() {
        let mut seen = HashSet::new();
        for position in 1..=BOARD_SIZE {
            let (row, col) = grid_coordinates(position);
            assert!(row < 10 && col < 10);
            assert!(seen.insert((row, col)), "cell {} collides", position);

            // Each row holds ten consecutive cells.
            let band = (position - 1) / 10;
            assert_eq!(row, 9 - band);
        }

        // Consecutive cells within a row are horizontally adjacent.
        for position in 1..BOARD_SIZE {
            let (row_a, col_a) = grid_coordinates(position);
            let (row_b, col_b) = grid_coordinates(position + 1);
            if row_a == row_b {
                assert_eq!((col_a as i16 - col_b as i16).abs(), 1);
            } else {
                // Row transitions keep the column (the track turns upward).
                assert_eq!(row_a, row_b + 1);
                assert_eq!(col_a, col_b);
            }
        }
    }
}
