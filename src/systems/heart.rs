//! Hearts: projectiles fired automatically while the player is powered.

use std::time::Duration;

use bevy_ecs::{
    entity::Entity,
    query::{With, Without},
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, trace};

use crate::{
    constants::{mechanics, timing},
    map::builder::Map,
    systems::{
        EntityType, Facing, Ghost, Heart, HeartBundle, PlayerControlled, Position, PowerState, ScoreResource, SpawnPoint,
    },
    time::GameTime,
};

/// Fire-rate limiter for hearts.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FireControl {
    /// Time of the last heart fired. `None` means the next shot is not rate limited.
    pub last_shot: Option<Duration>,
}

impl FireControl {
    pub fn can_fire(&self, now: Duration) -> bool {
        self.last_shot
            .is_none_or(|last| now.saturating_sub(last) >= timing::FIRE_INTERVAL)
    }
}

/// Fires a heart from the player's tile in the player's facing direction while powered.
pub fn heart_fire_system(
    mut commands: Commands,
    time: Res<GameTime>,
    power: Res<PowerState>,
    mut fire: ResMut<FireControl>,
    players: Query<(&Position, &Facing), With<PlayerControlled>>,
) {
    let now = time.now;
    if !power.is_active(now) || !fire.can_fire(now) {
        return;
    }

    let Ok((position, facing)) = players.single() else {
        return;
    };

    commands.spawn(HeartBundle {
        heart: Heart::new(facing.0),
        position: *position,
        entity_type: EntityType::Heart,
    });
    fire.last_shot = Some(now);
    trace!(position = %position.0, direction = ?facing.0, "Heart fired");
}

/// Advances every live heart by its sub-steps.
///
/// A heart that would enter a wall dies where it is. After each step, the heart dies
/// on the first ghost sharing its tile, sending that ghost back to its spawn.
pub fn heart_movement_system(
    map: Res<Map>,
    mut score: ResMut<ScoreResource>,
    mut hearts: Query<(&mut Heart, &mut Position), Without<Ghost>>,
    mut ghosts: Query<(&Ghost, &SpawnPoint, &mut Position), Without<Heart>>,
) {
    for (mut heart, mut position) in hearts.iter_mut() {
        if !heart.alive {
            continue;
        }

        for _ in 0..mechanics::HEART_SUB_STEPS {
            let Some(next) = map.step(position.0, heart.direction) else {
                heart.alive = false;
                break;
            };
            position.0 = next;

            let hit = ghosts
                .iter_mut()
                .filter(|(_, _, ghost_position)| ghost_position.0 == next)
                .min_by_key(|(ghost, _, _)| **ghost);
            if let Some((ghost, spawn, mut ghost_position)) = hit {
                ghost_position.0 = spawn.0;
                heart.alive = false;
                score.0 += mechanics::GHOST_HIT_SCORE;
                debug!(ghost = ghost.0, at = %next, score = score.0, "Heart struck ghost");
                break;
            }
        }
    }
}

/// Despawns hearts that died this tick.
pub fn heart_cleanup_system(mut commands: Commands, hearts: Query<(Entity, &Heart)>) {
    for (entity, heart) in hearts.iter() {
        if !heart.alive {
            commands.entity(entity).despawn();
        }
    }
}
