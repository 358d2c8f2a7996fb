//! Read-only view of the simulation, handed to the renderer after each tick.

use std::time::Duration;

use bevy_ecs::{query::With, world::World};
use glam::IVec2;

use crate::{
    constants::MapTile,
    error::{GameError, GameResult},
    map::{builder::Map, direction::Direction},
    systems::{
        Facing, GameStage, Ghost, Heart, PelletCount, PlayerControlled, PlayerLives, Position, PowerState, Rose,
        ScoreResource,
    },
    time::GameTime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView {
    pub position: IVec2,
    pub facing: Direction,
    pub powered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    /// Row-major live tiles.
    pub tiles: Vec<MapTile>,
    pub player: PlayerView,
    /// Ghost positions, ordered by ghost index.
    pub ghosts: Vec<IVec2>,
    pub rose: Option<IVec2>,
    /// Positions of the hearts still in flight.
    pub hearts: Vec<IVec2>,
    pub score: u32,
    pub lives: u8,
    pub pellets: u32,
    pub stage: GameStage,
    pub power_remaining: Duration,
}

impl Snapshot {
    /// Copies the renderable state out of the world.
    pub fn capture(world: &mut World) -> GameResult<Snapshot> {
        let now = world.resource::<GameTime>().now;
        let power = *world.resource::<PowerState>();

        let (position, facing) = world
            .query_filtered::<(&Position, &Facing), With<PlayerControlled>>()
            .single(world)
            .map(|(position, facing)| (position.0, facing.0))
            .map_err(|e| GameError::InvalidState(format!("No/multiple entities queried for snapshot: {}", e)))?;

        let mut ghosts: Vec<(Ghost, IVec2)> = world
            .query::<(&Ghost, &Position)>()
            .iter(world)
            .map(|(ghost, position)| (*ghost, position.0))
            .collect();
        ghosts.sort_by_key(|(ghost, _)| *ghost);

        let rose = world
            .query_filtered::<&Position, With<Rose>>()
            .iter(world)
            .next()
            .map(|position| position.0);

        let hearts = world
            .query::<(&Heart, &Position)>()
            .iter(world)
            .filter(|(heart, _)| heart.alive)
            .map(|(_, position)| position.0)
            .collect();

        let map = world.resource::<Map>();

        Ok(Snapshot {
            width: map.width(),
            height: map.height(),
            tiles: map.tiles().to_vec(),
            player: PlayerView {
                position,
                facing,
                powered: power.is_active(now),
            },
            ghosts: ghosts.into_iter().map(|(_, position)| position).collect(),
            rose,
            hearts,
            score: world.resource::<ScoreResource>().0,
            lives: world.resource::<PlayerLives>().0,
            pellets: world.resource::<PelletCount>().0,
            stage: *world.resource::<GameStage>(),
            power_remaining: power.remaining(now),
        })
    }

    pub fn running(&self) -> bool {
        self.stage.is_playing()
    }

    pub fn won(&self) -> bool {
        self.stage == GameStage::Won
    }

    pub fn tile(&self, pos: IVec2) -> Option<MapTile> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width as i32 || pos.y >= self.height as i32 {
            return None;
        }
        self.tiles.get((pos.y as u32 * self.width + pos.x as u32) as usize).copied()
    }
}
