use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, ResMut},
};
use tracing::info;

use crate::{
    constants::mechanics,
    error::GameError,
    systems::{
        BufferedDirection, Facing, GameStage, Ghost, Heart, PlayerControlled, PlayerLives, Position, SpawnPoint,
    },
};

/// Resolves a ghost catching the player, after everything has moved.
///
/// One catch costs exactly one life, however many ghosts share the tile. Losing the
/// last life ends the game where it stands. Otherwise the round resets: the player
/// and every ghost return to their spawns and all hearts are cleared, while score,
/// pellets and the maze are left alone.
#[allow(clippy::type_complexity)]
pub fn ghost_collision_system(
    mut commands: Commands,
    mut lives: ResMut<PlayerLives>,
    mut stage: ResMut<GameStage>,
    mut players: Query<
        (&mut Position, &SpawnPoint, &mut Facing, &mut BufferedDirection),
        (With<PlayerControlled>, Without<Ghost>),
    >,
    mut ghosts: Query<(&mut Position, &SpawnPoint), (With<Ghost>, Without<PlayerControlled>)>,
    hearts: Query<Entity, With<Heart>>,
    mut errors: EventWriter<GameError>,
) {
    let (mut position, spawn, mut facing, mut buffered) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for collision system: {}",
                e
            )));
            return;
        }
    };

    if !ghosts.iter().any(|(ghost_position, _)| ghost_position.0 == position.0) {
        return;
    }

    lives.0 = lives.0.saturating_sub(1);
    if lives.0 == 0 {
        *stage = GameStage::Lost;
        info!(at = %position.0, "Caught with no lives left, game lost");
        return;
    }

    info!(at = %position.0, lives = lives.0, "Caught by a ghost, resetting round");
    position.0 = spawn.0;
    facing.0 = mechanics::START_DIRECTION;
    buffered.0 = mechanics::START_DIRECTION;

    for (mut ghost_position, ghost_spawn) in ghosts.iter_mut() {
        ghost_position.0 = ghost_spawn.0;
    }

    for heart in hearts.iter() {
        commands.entity(heart).despawn();
    }
}
