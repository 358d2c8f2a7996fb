use bevy_ecs::{
    entity::Entity,
    query::{Or, With},
    resource::Resource,
    system::Res,
    world::World,
};
use strum_macros::IntoStaticStr;
use tracing::info;

use crate::constants::mechanics;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::{
    BufferedDirection, Facing, FireControl, Heart, PelletCount, PlayerControlled, Position, PowerState, Rose, RoseSpawner,
    ScoreResource, SpawnPoint,
};

/// A resource to track the overall stage of the game from a high-level perspective.
///
/// `Won` and `Lost` are terminal: gameplay systems stop running until a restart.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default, IntoStaticStr)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// Every pellet has been eaten.
    Won,
    /// The player ran out of lives.
    Lost,
}

impl GameStage {
    pub fn is_playing(self) -> bool {
        matches!(self, GameStage::Playing)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_playing()
    }
}

/// A resource to store the number of player lives.
#[derive(Resource, Debug)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(mechanics::STARTING_LIVES)
    }
}

/// Set by a restart command, consumed at the start of the next tick.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RestartRequested {
    pub pending: bool,
    /// Last move received after the restart command, replayed onto the fresh world.
    pub direction: Option<Direction>,
}

/// Run condition gating every gameplay system.
pub fn is_playing(stage: Res<GameStage>) -> bool {
    stage.is_playing()
}

pub fn restart_requested(requested: Res<RestartRequested>) -> bool {
    requested.pending
}

/// Applies a pending restart before any gameplay system runs.
///
/// Moves that arrived after the restart command survive it, so input order is kept
/// within a batch.
pub fn restart_system(world: &mut World) {
    let replay = world.resource::<RestartRequested>().direction;
    reset_world(world);

    if let Some(direction) = replay {
        let mut players = world.query_filtered::<&mut BufferedDirection, With<PlayerControlled>>();
        for mut buffered in players.iter_mut(world) {
            buffered.0 = direction;
        }
    }
}

/// Puts the world back into its initial state.
///
/// Restores every pellet and resets score, lives, stage, power, fire rate and the
/// rose schedule. Roses and hearts are despawned, and the player and ghosts return
/// to their spawn points.
pub fn reset_world(world: &mut World) {
    let previous = *world.resource::<GameStage>();

    let pellets = {
        let mut map = world.resource_mut::<Map>();
        map.reset();
        map.count_pellets()
    };

    world.insert_resource(ScoreResource(0));
    world.insert_resource(PlayerLives::default());
    world.insert_resource(PelletCount(pellets));
    world.insert_resource(GameStage::Playing);
    world.insert_resource(PowerState::default());
    world.insert_resource(FireControl::default());
    world.insert_resource(RoseSpawner::default());
    world.insert_resource(RestartRequested::default());

    let transient: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Rose>, With<Heart>)>>()
        .iter(world)
        .collect();
    for entity in transient {
        world.despawn(entity);
    }

    let mut spawned = world.query::<(&SpawnPoint, &mut Position)>();
    for (spawn, mut position) in spawned.iter_mut(world) {
        position.0 = spawn.0;
    }

    let mut players = world.query_filtered::<(&mut Facing, &mut BufferedDirection), With<PlayerControlled>>();
    for (mut facing, mut buffered) in players.iter_mut(world) {
        facing.0 = mechanics::START_DIRECTION;
        buffered.0 = mechanics::START_DIRECTION;
    }

    info!(from = <&'static str>::from(previous), pellets, "Game restarted");
}
