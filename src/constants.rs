//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(20, 20);

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapTile {
    /// An impassable tile.
    Wall,
    /// An open tile with nothing on it.
    Floor,
    /// An open tile holding a pellet.
    Pellet,
}

impl MapTile {
    pub const fn is_wall(self) -> bool {
        matches!(self, MapTile::Wall)
    }
}

/// Scoring and movement rules.
pub mod mechanics {
    use crate::map::direction::Direction;

    /// Score for eating a pellet.
    pub const PELLET_SCORE: u32 = 10;
    /// Score for collecting a rose.
    pub const ROSE_SCORE: u32 = 100;
    /// Score for a heart striking a ghost.
    pub const GHOST_HIT_SCORE: u32 = 250;
    pub const STARTING_LIVES: u8 = 3;
    /// How many tiles a heart attempts to travel per tick.
    pub const HEART_SUB_STEPS: u8 = 2;
    /// Facing and buffered direction of the player on spawn and after every reset.
    pub const START_DIRECTION: Direction = Direction::Right;
}

/// Power-state and fire-rate timing.
pub mod timing {
    use std::time::Duration;

    /// How long a rose keeps the player powered.
    pub const POWER_DURATION: Duration = Duration::from_millis(5_000);
    /// Minimum gap between two hearts.
    pub const FIRE_INTERVAL: Duration = Duration::from_millis(220);
}

/// Rose placement.
pub mod spawner {
    use std::ops::RangeInclusive;

    /// Random positions tried per attempt before deferring to a later tick.
    pub const SPAWN_TRIALS: u32 = 80;
    /// Delay, in milliseconds, armed the first time the board is seen without a rose.
    pub const FIRST_SPAWN_DELAY_MS: RangeInclusive<u64> = 8_000..=12_000;
    /// Delay, in milliseconds, scheduled after a rose has been placed.
    pub const RESPAWN_DELAY_MS: RangeInclusive<u64> = 12_000..=18_000;
}

/// The authoring table for the reference maze.
///
/// The board starts filled with pellets and surrounded by walls. Wall runs are
/// stamped on top, then the corridor and spawn-zone tiles are cleared to floor.
pub mod layout {
    use crate::map::direction::Direction;

    /// A straight run of wall tiles: start `(x, y)`, direction, and length in tiles.
    pub type WallRun = ((i32, i32), Direction, i32);

    pub const WALL_RUNS: [WallRun; 8] = [
        ((2, 3), Direction::Right, 16),
        ((2, 16), Direction::Right, 16),
        ((5, 8), Direction::Right, 10),
        ((5, 11), Direction::Right, 10),
        ((3, 5), Direction::Down, 6),
        ((16, 5), Direction::Down, 6),
        ((9, 5), Direction::Down, 6),
        ((10, 10), Direction::Down, 6),
    ];

    /// Corridor tiles along the top and bottom rows that carry no pellet.
    pub const CLEARED_TILES: [(i32, i32); 16] = [
        (1, 1),
        (2, 1),
        (3, 1),
        (4, 1),
        (15, 1),
        (16, 1),
        (17, 1),
        (18, 1),
        (1, 18),
        (2, 18),
        (3, 18),
        (4, 18),
        (15, 18),
        (16, 18),
        (17, 18),
        (18, 18),
    ];

    /// Top-left corner and size of the central zone that is always kept clear.
    pub const SPAWN_ZONE: ((i32, i32), (i32, i32)) = ((9, 9), (2, 2));

    pub const PLAYER_START: (i32, i32) = (1, 1);
    pub const GHOST_STARTS: [(i32, i32); 3] = [(18, 18), (18, 1), (1, 18)];
}

/// Terminal front end.
pub mod ui {
    /// Terminal columns used to draw a single board cell.
    pub const CELL_WIDTH: u16 = 2;
    /// Rows reserved above the board for the HUD.
    pub const HUD_ROWS: u16 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_board_cell_size() {
        assert_eq!(BOARD_CELL_SIZE.x, 20);
        assert_eq!(BOARD_CELL_SIZE.y, 20);
    }

    #[test]
    fn test_only_walls_block() {
        assert!(MapTile::Wall.is_wall());
        assert!(!MapTile::Floor.is_wall());
        assert!(!MapTile::Pellet.is_wall());
    }

    #[test]
    fn test_spawn_delay_ranges_are_asymmetric() {
        assert!(spawner::FIRST_SPAWN_DELAY_MS.start() < spawner::RESPAWN_DELAY_MS.start());
        assert!(spawner::FIRST_SPAWN_DELAY_MS.end() < spawner::RESPAWN_DELAY_MS.end());
    }

    #[test]
    fn test_layout_starts_are_inside_the_board() {
        let inside = |(x, y): (i32, i32)| x > 0 && y > 0 && x < BOARD_CELL_SIZE.x as i32 - 1 && y < BOARD_CELL_SIZE.y as i32 - 1;

        assert!(inside(layout::PLAYER_START));
        assert!(layout::GHOST_STARTS.into_iter().all(inside));
    }

    #[test]
    fn test_wall_runs_stay_inside_the_border() {
        for ((x, y), direction, length) in layout::WALL_RUNS {
            let end = glam::IVec2::new(x, y) + direction.as_ivec2() * (length - 1);
            assert!(end.x > 0 && end.x < BOARD_CELL_SIZE.x as i32 - 1, "run from ({x}, {y}) leaves the board");
            assert!(end.y > 0 && end.y < BOARD_CELL_SIZE.y as i32 - 1, "run from ({x}, {y}) leaves the board");
        }
    }

    #[test]
    fn test_fire_interval_is_shorter_than_power() {
        assert!(timing::FIRE_INTERVAL < timing::POWER_DURATION);
    }
}
