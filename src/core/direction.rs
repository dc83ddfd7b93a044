//! Movement directions shared by the cursor and the editing operations

/// A cursor movement or deletion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// -1 for Up/Left, +1 for Down/Right.
    pub fn displacement(self) -> isize {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }

    /// Whether entering a list in this direction lands at its end
    /// (true) or its start (false).
    pub fn enters_at_end(self) -> bool {
        self.displacement() < 0
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement() {
        assert_eq!(Direction::Left.displacement(), -1);
        assert_eq!(Direction::Down.displacement(), 1);
        assert!(Direction::Up.enters_at_end());
        assert!(!Direction::Right.enters_at_end());
    }

    #[test]
    fn test_vertical() {
        assert!(Direction::Up.is_vertical());
        assert!(Direction::Left.is_horizontal());
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }
}
