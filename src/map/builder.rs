//! Map construction and validation.

use std::collections::HashSet;

use bevy_ecs::resource::Resource;
use glam::IVec2;
use pathfinding::prelude::bfs_reach;
use tracing::debug;

use crate::constants::MapTile;
use crate::error::{GameResult, MapError};
use crate::map::direction::Direction;
use crate::map::layout::Layout;
use crate::map::parser::MapTileParser;

/// The playable board.
///
/// Keeps the pristine layout it was built from next to the live tile grid, so that
/// eaten pellets can be restored on restart. The live grid only ever changes by
/// pellets turning into floor.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    layout: Layout,
    tiles: Vec<MapTile>,
}

impl Map {
    /// Validates a layout and builds a map from it.
    ///
    /// # Errors
    ///
    /// Rejects layouts whose tile count does not match their size, whose border is
    /// not solid wall, whose player spawn is not a floor tile, whose ghost spawns are
    /// out of bounds, walled in, or unreachable, and layouts with no pellets or with
    /// pellets the player can never reach.
    pub fn new(layout: Layout) -> GameResult<Map> {
        Self::validate(&layout)?;
        debug!(
            width = layout.width,
            height = layout.height,
            pellets = layout.pellet_count(),
            ghosts = layout.ghost_starts.len(),
            "Map validated"
        );

        Ok(Map {
            tiles: layout.tiles.clone(),
            layout,
        })
    }

    /// Builds the reference maze.
    pub fn reference() -> GameResult<Map> {
        Self::new(Layout::reference())
    }

    /// Parses and validates an ASCII board. See [`MapTileParser`] for the format.
    pub fn parse(raw_board: &[&str]) -> GameResult<Map> {
        Self::new(MapTileParser::parse_board(raw_board)?)
    }

    fn validate(layout: &Layout) -> Result<(), MapError> {
        let expected = layout.width as usize * layout.height as usize;
        if layout.width == 0 || layout.height == 0 || layout.tiles.len() != expected {
            return Err(MapError::DimensionMismatch {
                width: layout.width,
                height: layout.height,
                tiles: layout.tiles.len(),
            });
        }

        let (w, h) = (layout.width as i32, layout.height as i32);
        let border = (0..w)
            .flat_map(|x| [IVec2::new(x, 0), IVec2::new(x, h - 1)])
            .chain((0..h).flat_map(|y| [IVec2::new(0, y), IVec2::new(w - 1, y)]));
        for pos in border {
            if layout.tile(pos) != Some(MapTile::Wall) {
                return Err(MapError::OpenBorder(pos));
            }
        }

        match layout.tile(layout.player_start) {
            None => return Err(MapError::SpawnOutOfBounds(layout.player_start)),
            Some(MapTile::Floor) => {}
            Some(_) => return Err(MapError::PlayerSpawnNotFloor(layout.player_start)),
        }

        for &spawn in &layout.ghost_starts {
            match layout.tile(spawn) {
                None => return Err(MapError::SpawnOutOfBounds(spawn)),
                Some(MapTile::Wall) => return Err(MapError::SpawnInWall(spawn)),
                Some(_) => {}
            }
        }

        let reachable: HashSet<IVec2> = bfs_reach(layout.player_start, move |&pos| {
            Direction::DIRECTIONS
                .into_iter()
                .map(move |direction| pos + direction.as_ivec2())
                .filter(move |next| layout.tile(*next).is_some_and(|tile| !tile.is_wall()))
        })
        .collect();

        if let Some(&spawn) = layout.ghost_starts.iter().find(|spawn| !reachable.contains(*spawn)) {
            return Err(MapError::UnreachableSpawn(spawn));
        }

        let mut pellets = 0;
        for y in 0..h {
            for x in 0..w {
                let pos = IVec2::new(x, y);
                if layout.tile(pos) == Some(MapTile::Pellet) {
                    if !reachable.contains(&pos) {
                        return Err(MapError::UnreachablePellet(pos));
                    }
                    pellets += 1;
                }
            }
        }
        if pellets == 0 {
            return Err(MapError::NoPellets);
        }

        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.layout.width as i32 && pos.y < self.layout.height as i32
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y as u32 * self.layout.width + pos.x as u32) as usize)
    }

    /// Returns the live tile at `pos`, or `None` outside the board.
    pub fn tile(&self, pos: IVec2) -> Option<MapTile> {
        self.index(pos).map(|index| self.tiles[index])
    }

    /// Row-major live tiles.
    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    /// True for wall tiles and for anything outside the board.
    pub fn is_wall(&self, pos: IVec2) -> bool {
        self.tile(pos).is_none_or(MapTile::is_wall)
    }

    /// The tile one step from `pos` in `direction`, or `None` if that tile is a wall.
    pub fn step(&self, pos: IVec2, direction: Direction) -> Option<IVec2> {
        let next = pos + direction.as_ivec2();
        (!self.is_wall(next)).then_some(next)
    }

    /// Scans the live grid for remaining pellets.
    pub fn count_pellets(&self) -> u32 {
        self.tiles.iter().filter(|tile| **tile == MapTile::Pellet).count() as u32
    }

    /// Turns the pellet at `pos` into floor. Returns whether there was one.
    pub fn consume_pellet(&mut self, pos: IVec2) -> bool {
        match self.index(pos) {
            Some(index) if self.tiles[index] == MapTile::Pellet => {
                self.tiles[index] = MapTile::Floor;
                true
            }
            _ => false,
        }
    }

    /// Restores every pellet from the pristine layout.
    pub fn reset(&mut self) {
        self.tiles.clone_from(&self.layout.tiles);
    }

    pub fn player_start(&self) -> IVec2 {
        self.layout.player_start
    }

    pub fn ghost_starts(&self) -> &[IVec2] {
        &self.layout.ghost_starts
    }
}
