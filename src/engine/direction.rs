use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the autopilot evaluates them
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The unit vector for the direction.  `y` grows downwards.
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn reverse_cancels_delta(#[case] d: Direction) {
        let (dx, dy) = d.delta();
        let (rx, ry) = d.reverse().delta();
        assert_eq!((dx + rx, dy + ry), (0, 0));
        assert_eq!(d.reverse().reverse(), d);
    }

    #[test]
    fn unit_vectors() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{d}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(format!("{:>5}", Direction::Up), "   up");
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
