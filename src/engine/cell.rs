use super::direction::Direction;
use crate::options::GridSize;
use serde::Serialize;

/// A cell of the playing field.
///
/// Coordinates are signed: in walled mode the snake's head may step outside
/// the grid on the tick it dies, and a freshly-started snake's tail may begin
/// to the left of column 0.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell one unit step away in `direction`, with no boundary
    /// handling
    pub(crate) fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance between two cells.  Wraparound is not taken into
    /// account.
    pub(crate) fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// How moves that leave the grid are treated
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Boundary {
    /// Coordinates are reduced modulo the grid size
    Wrap,

    /// Leaving the grid is a fatal collision
    Walled,
}

impl Boundary {
    pub(crate) fn from_wall_mode(wall_mode: bool) -> Boundary {
        if wall_mode {
            Boundary::Walled
        } else {
            Boundary::Wrap
        }
    }

    pub(crate) fn is_walled(self) -> bool {
        self == Boundary::Walled
    }
}

/// A square grid of side `size`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: i32,
}

impl Grid {
    pub(crate) fn size(self) -> i32 {
        self.size
    }

    /// Total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        let side = usize::try_from(self.size).unwrap_or_default();
        side * side
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    /// Apply `boundary` to a freshly-stepped cell.  Walled cells are returned
    /// unchanged, even when off the grid.
    pub(crate) fn confine(self, cell: Cell, boundary: Boundary) -> Cell {
        match boundary {
            Boundary::Wrap => Cell {
                x: cell.x.rem_euclid(self.size),
                y: cell.y.rem_euclid(self.size),
            },
            Boundary::Walled => cell,
        }
    }

    /// Distance from `cell` to the nearest edge of the grid.  Negative for
    /// cells outside the grid.
    pub(crate) fn distance_to_edge(self, cell: Cell) -> i32 {
        let far = self.size - 1;
        cell.x.min(cell.y).min(far - cell.x).min(far - cell.y)
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell { x, y }))
    }
}

impl From<GridSize> for Grid {
    fn from(size: GridSize) -> Grid {
        Grid {
            size: i32::from(size.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid18() -> Grid {
        Grid::from(GridSize::default())
    }

    #[rstest]
    #[case(Cell::new(5, 5), Boundary::Wrap, Cell::new(5, 5))]
    #[case(Cell::new(-1, 5), Boundary::Wrap, Cell::new(17, 5))]
    #[case(Cell::new(18, 5), Boundary::Wrap, Cell::new(0, 5))]
    #[case(Cell::new(4, -1), Boundary::Wrap, Cell::new(4, 17))]
    #[case(Cell::new(4, 18), Boundary::Wrap, Cell::new(4, 0))]
    #[case(Cell::new(-1, 5), Boundary::Walled, Cell::new(-1, 5))]
    #[case(Cell::new(4, 18), Boundary::Walled, Cell::new(4, 18))]
    fn test_confine(#[case] cell: Cell, #[case] boundary: Boundary, #[case] expected: Cell) {
        assert_eq!(grid18().confine(cell, boundary), expected);
    }

    #[rstest]
    #[case(Cell::new(0, 9), 0)]
    #[case(Cell::new(9, 0), 0)]
    #[case(Cell::new(17, 9), 0)]
    #[case(Cell::new(3, 5), 3)]
    #[case(Cell::new(8, 9), 8)]
    #[case(Cell::new(-1, 9), -1)]
    fn test_distance_to_edge(#[case] cell: Cell, #[case] expected: i32) {
        assert_eq!(grid18().distance_to_edge(cell), expected);
    }

    #[test]
    fn manhattan_ignores_wraparound() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(17, 17)), 34);
        assert_eq!(Cell::new(3, 7).manhattan(Cell::new(6, 5)), 5);
    }

    #[test]
    fn cells_cover_grid() {
        let grid = grid18();
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), grid.area());
        assert!(cells.iter().all(|&c| grid.contains(c)));
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(17, 17)));
    }
}
