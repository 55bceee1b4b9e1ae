//! Random tile placement

use rand::Rng;

use super::board::{Board, Coord};
use crate::consts::FOUR_PROBABILITY;

/// Value for a fresh tile: 4 with FOUR_PROBABILITY, otherwise 2
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random_bool(FOUR_PROBABILITY) { 4 } else { 2 }
}

/// Place a new tile in a uniformly chosen empty cell.
///
/// Returns the cell used, or None when the board is full.
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<Coord> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let at = empty[rng.random_range(0..empty.len())];
    board.set(at, random_tile_value(rng));
    Some(at)
}
