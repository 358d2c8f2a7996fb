//! Static board layouts, before validation.

use glam::IVec2;

use crate::constants::{layout, MapTile, BOARD_CELL_SIZE};

/// A board as authored: tiles plus the spawn coordinates of every entity.
///
/// A `Layout` is not guaranteed to be playable; [`crate::map::builder::Map::new`]
/// validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// Row-major tiles, `width * height` long.
    pub tiles: Vec<MapTile>,
    pub player_start: IVec2,
    /// Ghost spawn points, in ghost index order.
    pub ghost_starts: Vec<IVec2>,
}

impl Layout {
    /// Builds the reference 20x20 maze from the authoring table in [`crate::constants::layout`].
    pub fn reference() -> Layout {
        let width = BOARD_CELL_SIZE.x;
        let height = BOARD_CELL_SIZE.y;
        let mut tiles = vec![MapTile::Pellet; (width * height) as usize];
        let index = |pos: IVec2| (pos.y as u32 * width + pos.x as u32) as usize;

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if x == 0 || y == 0 || x == width as i32 - 1 || y == height as i32 - 1 {
                    tiles[index(IVec2::new(x, y))] = MapTile::Wall;
                }
            }
        }

        for ((x, y), direction, length) in layout::WALL_RUNS {
            let start = IVec2::new(x, y);
            for step in 0..length {
                tiles[index(start + direction.as_ivec2() * step)] = MapTile::Wall;
            }
        }

        for (x, y) in layout::CLEARED_TILES {
            tiles[index(IVec2::new(x, y))] = MapTile::Floor;
        }

        let ((zone_x, zone_y), (zone_w, zone_h)) = layout::SPAWN_ZONE;
        for y in zone_y..zone_y + zone_h {
            for x in zone_x..zone_x + zone_w {
                tiles[index(IVec2::new(x, y))] = MapTile::Floor;
            }
        }

        let player_start = IVec2::from(layout::PLAYER_START);
        tiles[index(player_start)] = MapTile::Floor;

        Layout {
            width,
            height,
            tiles,
            player_start,
            ghost_starts: layout::GHOST_STARTS.into_iter().map(IVec2::from).collect(),
        }
    }

    /// Returns the tile at `pos`, or `None` when it lies outside the board.
    pub fn tile(&self, pos: IVec2) -> Option<MapTile> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width as i32 || pos.y >= self.height as i32 {
            return None;
        }
        self.tiles.get((pos.y as u32 * self.width + pos.x as u32) as usize).copied()
    }

    /// Counts the pellet tiles in the layout.
    pub fn pellet_count(&self) -> u32 {
        self.tiles.iter().filter(|tile| **tile == MapTile::Pellet).count() as u32
    }
}
