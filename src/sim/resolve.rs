//! Move resolution
//!
//! Slides every tile as far as it can go in one direction, merging equal
//! neighbours. Tiles nearest the target wall settle first, and a cell that
//! received a merge cannot receive another during the same move.

use super::board::{Board, Coord, can_merge};
use super::state::Direction;
use crate::consts::{GRID_SIZE, WIN_TILE};

/// Result of resolving one move on a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Any tile slid or merged
    pub moved: bool,
    /// Sum of all merged values
    pub points: u64,
    /// Merge destinations in resolution order
    pub merged: Vec<Coord>,
    /// Some merge produced the winning tile
    pub reached_win: bool,
}

/// Slide and merge tiles in place. No randomness.
pub fn resolve_move(board: &mut Board, dir: Direction) -> Resolution {
    let (row_delta, col_delta) = dir.delta();
    let mut merged_into = [[false; GRID_SIZE]; GRID_SIZE];
    let mut result = Resolution::default();

    for line in 0..GRID_SIZE {
        for step in 0..GRID_SIZE {
            let pos = if dir.scans_reversed() {
                GRID_SIZE - 1 - step
            } else {
                step
            };
            let start = if dir.is_horizontal() {
                Coord::new(line, pos)
            } else {
                Coord::new(pos, line)
            };

            let value = board.get(start);
            if value == 0 {
                continue;
            }

            let mut at = start;
            while let Some(next) = at.offset(row_delta, col_delta) {
                let target = board.get(next);
                if target == 0 {
                    board.set(next, value);
                    board.set(at, 0);
                    at = next;
                    result.moved = true;
                } else if can_merge(target, value) && !merged_into[next.row][next.col] {
                    let Some(doubled) = value.checked_mul(2) else {
                        break;
                    };
                    board.set(next, doubled);
                    board.set(at, 0);
                    merged_into[next.row][next.col] = true;
                    result.merged.push(next);
                    result.points = result.points.saturating_add(u64::from(doubled));
                    result.moved = true;
                    if doubled == WIN_TILE {
                        result.reached_win = true;
                    }
                    break;
                } else {
                    break;
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_TILE;
    use proptest::prelude::*;

    fn row(values: [u32; 4]) -> Board {
        Board::from_rows([values, [0; 4], [0; 4], [0; 4]])
    }

    fn column(values: [u32; 4]) -> Board {
        Board::from_rows([
            [values[0], 0, 0, 0],
            [values[1], 0, 0, 0],
            [values[2], 0, 0, 0],
            [values[3], 0, 0, 0],
        ])
    }

    fn column_of(board: &Board) -> [u32; 4] {
        let rows = board.rows();
        [rows[0][0], rows[1][0], rows[2][0], rows[3][0]]
    }

    /// Classic compress-then-merge of one line toward index 0
    fn reference_line(line: [u32; 4]) -> ([u32; 4], u64) {
        let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
        let mut out = [0u32; 4];
        let mut points = 0;
        let mut i = 0;
        let mut slot = 0;
        while i < tiles.len() {
            if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
                out[slot] = tiles[i] * 2;
                points += u64::from(tiles[i] * 2);
                i += 2;
            } else {
                out[slot] = tiles[i];
                i += 1;
            }
            slot += 1;
        }
        (out, points)
    }

    #[test]
    fn test_pair_merges_left() {
        let mut board = row([2, 2, 0, 0]);
        let res = resolve_move(&mut board, Direction::Left);
        assert_eq!(board.rows()[0], [4, 0, 0, 0]);
        assert_eq!(res.points, 4);
        assert_eq!(res.merged, vec![Coord::new(0, 0)]);
        assert!(res.moved);
    }

    #[test]
    fn test_cell_merges_once_per_move() {
        let mut board = row([2, 2, 2, 2]);
        let res = resolve_move(&mut board, Direction::Left);
        assert_eq!(board.rows()[0], [4, 4, 0, 0]);
        assert_eq!(res.points, 8);

        let mut board = row([2, 2, 2, 2]);
        resolve_move(&mut board, Direction::Right);
        assert_eq!(board.rows()[0], [0, 0, 4, 4]);
    }

    #[test]
    fn test_merged_tile_blocks_following_equal_tile() {
        let mut board = row([2, 2, 4, 0]);
        resolve_move(&mut board, Direction::Left);
        assert_eq!(board.rows()[0], [4, 4, 0, 0]);
    }

    #[test]
    fn test_far_end_settles_first() {
        let mut board = row([0, 2, 2, 2]);
        resolve_move(&mut board, Direction::Right);
        assert_eq!(board.rows()[0], [0, 0, 2, 4]);

        let mut board = column([2, 2, 2, 0]);
        resolve_move(&mut board, Direction::Down);
        assert_eq!(column_of(&board), [0, 0, 2, 4]);

        let mut board = column([0, 2, 2, 2]);
        resolve_move(&mut board, Direction::Up);
        assert_eq!(column_of(&board), [4, 2, 0, 0]);
    }

    #[test]
    fn test_slide_without_merge() {
        let mut board = row([0, 4, 0, 2]);
        let res = resolve_move(&mut board, Direction::Left);
        assert_eq!(board.rows()[0], [4, 2, 0, 0]);
        assert!(res.moved);
        assert_eq!(res.points, 0);
        assert!(res.merged.is_empty());
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let mut board = row([2, 4, 8, 16]);
        let before = board;
        let res = resolve_move(&mut board, Direction::Left);
        assert_eq!(board, before);
        assert_eq!(res, Resolution::default());
    }

    #[test]
    fn test_winning_merge_flagged() {
        let mut board = row([1024, 1024, 0, 0]);
        let res = resolve_move(&mut board, Direction::Left);
        assert!(res.reached_win);
        assert_eq!(res.points, 2048);

        let mut board = row([2048, 2048, 0, 0]);
        let res = resolve_move(&mut board, Direction::Left);
        assert!(!res.reached_win);
        assert_eq!(board.rows()[0], [4096, 0, 0, 0]);
    }

    #[test]
    fn test_oversized_tiles_never_merge() {
        let mut board = row([MAX_TILE, MAX_TILE, 0, 0]);
        let res = resolve_move(&mut board, Direction::Left);
        assert!(!res.moved);
        assert_eq!(board.rows()[0], [MAX_TILE, MAX_TILE, 0, 0]);

        // out-of-range values slide but never overflow
        let mut board = row([0, 1 << 31, 1 << 31, 0]);
        let res = resolve_move(&mut board, Direction::Left);
        assert_eq!(board.rows()[0], [1 << 31, 1 << 31, 0, 0]);
        assert_eq!(res.points, 0);
    }

    #[test]
    fn test_stuck_board_never_moves() {
        let stuck = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        for dir in Direction::ALL {
            let mut after = stuck;
            assert!(!resolve_move(&mut after, dir).moved);
            assert_eq!(after, stuck);
        }
    }

    fn tile() -> impl Strategy<Value = u32> {
        prop_oneof![Just(0u32), (1u32..=11).prop_map(|e| 1 << e)]
    }

    fn any_board() -> impl Strategy<Value = Board> {
        proptest::array::uniform4(proptest::array::uniform4(tile())).prop_map(Board::from_rows)
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_tile_count_never_grows(board in any_board(), dir in any_direction()) {
            let mut after = board;
            let res = resolve_move(&mut after, dir);
            prop_assert_eq!(after.tile_count() + res.merged.len(), board.tile_count());
            prop_assert_eq!(after.tile_sum(), board.tile_sum());
        }

        #[test]
        fn prop_points_equal_merged_values(board in any_board(), dir in any_direction()) {
            let mut after = board;
            let res = resolve_move(&mut after, dir);
            let merged_sum: u64 = res.merged.iter().map(|&c| u64::from(after.get(c))).sum();
            prop_assert_eq!(res.points, merged_sum);
        }

        #[test]
        fn prop_unmoved_means_unchanged(board in any_board(), dir in any_direction()) {
            let mut after = board;
            let res = resolve_move(&mut after, dir);
            prop_assert_eq!(res.moved, after != board);
        }

        #[test]
        fn prop_left_matches_classic_rules(board in any_board()) {
            let mut after = board;
            let res = resolve_move(&mut after, Direction::Left);
            let mut expected_points = 0;
            for (line, got) in board.rows().iter().zip(after.rows().iter()) {
                let (expected, points) = reference_line(*line);
                prop_assert_eq!(*got, expected);
                expected_points += points;
            }
            prop_assert_eq!(res.points, expected_points);
        }
    }
}
