//! Primitive board steps and the derived diagonal directions.
//!
//! Paths are authored in a forward-facing frame and normalized by the owning
//! player's direction at resolution time.

use crate::game_state::chess_types::PlayDirection;

/// One orthogonal hop between adjacent tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_STEPS: [Step; 4] = [Step::Up, Step::Down, Step::Left, Step::Right];

impl Step {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Step::Up => 0,
            Step::Down => 1,
            Step::Left => 2,
            Step::Right => 3,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Step::Up => Step::Down,
            Step::Down => Step::Up,
            Step::Left => Step::Right,
            Step::Right => Step::Left,
        }
    }

    /// Row/column delta with row 0 at the top edge.
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Step::Up => (-1, 0),
            Step::Down => (1, 0),
            Step::Left => (0, -1),
            Step::Right => (0, 1),
        }
    }

    #[inline]
    pub const fn normalized(self, direction: PlayDirection) -> Self {
        match direction {
            PlayDirection::Forward => self,
            PlayDirection::Backward => self.opposite(),
        }
    }
}

/// Neighbor lookup direction. Diagonals are neighbor-of-neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Primitive steps walked to reach the neighbor, vertical step first.
    pub const fn steps(self) -> &'static [Step] {
        match self {
            Direction::Up => &[Step::Up],
            Direction::Down => &[Step::Down],
            Direction::Left => &[Step::Left],
            Direction::Right => &[Step::Right],
            Direction::UpLeft => &[Step::Up, Step::Left],
            Direction::UpRight => &[Step::Up, Step::Right],
            Direction::DownLeft => &[Step::Down, Step::Left],
            Direction::DownRight => &[Step::Down, Step::Right],
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }
}

/// Ordered steps describing one candidate move.
pub type Path = Vec<Step>;

pub fn normalize(path: &[Step], direction: PlayDirection) -> Path {
    path.iter().map(|step| step.normalized(direction)).collect()
}
