use super::cell::Cell;
use super::direction::Direction;
use std::collections::VecDeque;

/// Head-first segments of the snake
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    segments: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake of `len` cells with its head at `head`, laid out in a
    /// straight line behind it as if it had been moving in `direction`.
    ///
    /// The trailing cells are not confined to any grid.
    pub(crate) fn new(head: Cell, direction: Direction, len: usize) -> Snake {
        let behind = direction.reverse();
        let segments = std::iter::successors(Some(head), |&c| Some(c.step(behind)))
            .take(len)
            .collect();
        Snake { segments }
    }

    #[cfg(test)]
    pub(crate) fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Snake {
        Snake {
            segments: cells.into_iter().collect(),
        }
    }

    pub(crate) fn head(&self) -> Cell {
        self.segments.front().copied().unwrap_or_default()
    }

    /// Iterate over the segments, head first
    pub(crate) fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.segments.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) {
        self.segments.pop_back();
    }

    /// Does the head share a cell with any segment at index `start` or
    /// later?
    pub(crate) fn head_overlaps_from(&self, start: usize) -> bool {
        let head = self.head();
        self.segments.iter().skip(start).any(|&c| c == head)
    }
}
