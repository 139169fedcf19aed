//! Native actions of the grid world.
use strum::EnumIter;

/// A move on the grid.
///
/// The discriminants follow the joystick codes of the Arcade Learning
/// Environment, so they are not contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(i32)]
pub enum GridMove {
    Noop = 0,
    Up = 2,
    Right = 3,
    Left = 4,
    Down = 5,
}

impl GridMove {
    /// Displacement `(dx, dy)` of the move, `y` growing downwards.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::Noop => (0, 0),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
        }
    }
}
