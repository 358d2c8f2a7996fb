use std::time::Duration;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::IVec2;
use rand::rngs::SmallRng;

use crate::map::direction::Direction;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Ghost,
    Rose,
    Heart,
}

/// A ghost, identified by its index into the map's ghost spawns.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ghost(pub u8);

/// The grid tile an entity occupies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub IVec2);

/// Where an entity returns on a round reset or restart.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPoint(pub IVec2);

/// The direction the player is committed to moving in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Facing(pub Direction);

/// The last direction requested by input, applied once the turn is open.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferedDirection(pub Direction);

/// The power-up. At most one exists at a time.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rose {
    pub spawned_at: Duration,
}

/// A projectile fired while powered.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heart {
    pub direction: Direction,
    /// Cleared when the heart hits a wall or a ghost; dead hearts are despawned at the end of the tick.
    pub alive: bool,
}

impl Heart {
    pub fn new(direction: Direction) -> Self {
        Self { direction, alive: true }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub facing: Facing,
    pub buffered_direction: BufferedDirection,
    pub entity_type: EntityType,
}

impl PlayerBundle {
    pub fn new(start: IVec2, direction: Direction) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(start),
            spawn: SpawnPoint(start),
            facing: Facing(direction),
            buffered_direction: BufferedDirection(direction),
            entity_type: EntityType::Player,
        }
    }
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub entity_type: EntityType,
}

impl GhostBundle {
    pub fn new(index: u8, start: IVec2) -> Self {
        Self {
            ghost: Ghost(index),
            position: Position(start),
            spawn: SpawnPoint(start),
            entity_type: EntityType::Ghost,
        }
    }
}

#[derive(Bundle)]
pub struct RoseBundle {
    pub rose: Rose,
    pub position: Position,
    pub entity_type: EntityType,
}

#[derive(Bundle)]
pub struct HeartBundle {
    pub heart: Heart,
    pub position: Position,
    pub entity_type: EntityType,
}

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ScoreResource(pub u32);

/// Pellets left on the board. Reaching zero wins the game.
#[derive(Resource, Debug, Default)]
pub struct PelletCount(pub u32);

/// Random source for rose placement and spawn delays.
#[derive(Resource)]
pub struct SpawnRng(pub SmallRng);
