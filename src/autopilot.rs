//! One-ply greedy steering.
//!
//! Each of the four directions is scored by where it would put the head:
//! closer to the food is better, further from the rest of the body is better,
//! and in walled mode further from the edge is better.  There is no
//! lookahead, so the snake can and does steer itself into dead ends.
use crate::engine::{Board, Cell, Direction};

/// Weight of the Manhattan distance to the food (a penalty)
const FOOD_WEIGHT: i32 = 2;

/// Weight of the distance to the nearest edge, in walled mode only
const WALL_WEIGHT: i32 = 3;

/// Pick the direction with the best score.
///
/// Directions that would put the head on any current snake cell are never
/// chosen.  Ties go to whichever direction comes first in
/// [`Direction::ALL`].  Returns `None` if every direction is blocked.
pub(crate) fn choose_direction(board: &Board<'_>) -> Option<Direction> {
    let head = board.snake.head();
    let mut best: Option<(Direction, i32)> = None;
    for direction in Direction::ALL {
        let cell = board.grid.confine(head.step(direction), board.boundary);
        if board.snake.contains(cell) {
            tracing::trace!(%direction, "Candidate would hit the snake; skipping");
            continue;
        }
        let score = evaluate_move(board, cell);
        tracing::trace!(%direction, score, "Evaluated candidate");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((direction, score));
        }
    }
    best.map(|(direction, _)| direction)
}

/// Score a prospective head position
fn evaluate_move(board: &Board<'_>, cell: Cell) -> i32 {
    let to_food = cell.manhattan(board.food);
    let to_tail = board
        .snake
        .iter()
        .skip(1)
        .map(|segment| cell.manhattan(segment))
        .min()
        .unwrap_or_default();
    let mut score = to_tail - FOOD_WEIGHT * to_food;
    if board.boundary.is_walled() {
        score += WALL_WEIGHT * board.grid.distance_to_edge(cell);
    }
    score
}
