use crate::games::SessionRng;
use super::types::Position;

/// Uniform pick among the empty cells. No lookahead.
pub fn choose_move(empty_positions: &[Position], rng: &mut SessionRng) -> Option<Position> {
    if empty_positions.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..empty_positions.len());
    Some(empty_positions[idx])
}
