use glam::IVec2;
use strum_macros::AsRefStr;

/// The four cardinal directions. Screen coordinates, so `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is just a convenience constant for iterating over the directions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Candidate order for ghost pursuit. Ties in distance keep this order.
    pub const PURSUIT_ORDER: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Returns the unit step for this direction.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_as_ivec2() {
        assert_eq!(Direction::Up.as_ivec2(), -IVec2::Y);
        assert_eq!(Direction::Down.as_ivec2(), IVec2::Y);
        assert_eq!(Direction::Left.as_ivec2(), -IVec2::X);
        assert_eq!(Direction::Right.as_ivec2(), IVec2::X);
    }

    #[test]
    fn test_unit_steps_are_distinct() {
        for (i, a) in Direction::DIRECTIONS.into_iter().enumerate() {
            assert_eq!(a.as_ivec2().abs().element_sum(), 1);
            for b in Direction::DIRECTIONS.into_iter().skip(i + 1) {
                assert_ne!(a.as_ivec2(), b.as_ivec2());
            }
        }
    }

    #[test]
    fn test_pursuit_order_covers_every_direction() {
        for direction in Direction::DIRECTIONS {
            assert!(Direction::PURSUIT_ORDER.contains(&direction));
        }
        assert_eq!(Direction::PURSUIT_ORDER[0], Direction::Left);
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(Direction::Left.as_ref(), "left");
        assert_eq!(Direction::default(), Direction::Right);
    }
}
