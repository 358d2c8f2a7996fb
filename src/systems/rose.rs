//! The rose power-up: timed placement, collection, and the power window it grants.

use std::ops::RangeInclusive;
use std::time::Duration;

use bevy_ecs::{
    entity::Entity,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::IVec2;
use rand::{rngs::SmallRng, Rng};
use tracing::{debug, trace};

use crate::{
    constants::{mechanics, spawner, timing},
    map::builder::Map,
    systems::{EntityType, PlayerControlled, Position, Rose, RoseBundle, ScoreResource, SpawnRng},
    time::GameTime,
};

/// Schedules rose placement.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RoseSpawner {
    /// Earliest time the next rose may be placed. `None` until the first tick without a rose arms it.
    pub next_spawn_at: Option<Duration>,
}

/// The player's power window. Hearts are fired while it is open.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PowerState {
    pub expires_at: Duration,
}

impl PowerState {
    pub fn is_active(&self, now: Duration) -> bool {
        now < self.expires_at
    }

    /// Extends the window to `now + duration`. Never shortens it.
    pub fn extend(&mut self, now: Duration, duration: Duration) {
        self.expires_at = self.expires_at.max(now + duration);
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.expires_at.saturating_sub(now)
    }
}

fn random_delay(rng: &mut SmallRng, range_ms: RangeInclusive<u64>) -> Duration {
    Duration::from_millis(rng.random_range(range_ms))
}

/// Places a rose once the scheduled time has passed and none is on the board.
///
/// Tries a bounded number of random interior tiles, skipping walls and the player's
/// tile. When every trial misses the attempt is retried next tick without
/// rescheduling.
pub fn rose_spawner_system(
    mut commands: Commands,
    time: Res<GameTime>,
    map: Res<Map>,
    mut schedule: ResMut<RoseSpawner>,
    mut rng: ResMut<SpawnRng>,
    roses: Query<(), With<Rose>>,
    players: Query<&Position, With<PlayerControlled>>,
) {
    if !roses.is_empty() {
        return;
    }

    let now = time.now;
    let next_spawn_at = *schedule.next_spawn_at.get_or_insert_with(|| {
        let at = now + random_delay(&mut rng.0, spawner::FIRST_SPAWN_DELAY_MS);
        trace!(at = ?at, "Armed first rose spawn");
        at
    });
    if now < next_spawn_at {
        return;
    }

    let player = players.single().ok().map(|position| position.0);
    let (width, height) = (map.width() as i32, map.height() as i32);

    for _ in 0..spawner::SPAWN_TRIALS {
        let candidate = IVec2::new(rng.0.random_range(1..width - 1), rng.0.random_range(1..height - 1));
        if map.is_wall(candidate) || Some(candidate) == player {
            continue;
        }

        commands.spawn(RoseBundle {
            rose: Rose { spawned_at: now },
            position: Position(candidate),
            entity_type: EntityType::Rose,
        });
        schedule.next_spawn_at = Some(now + random_delay(&mut rng.0, spawner::RESPAWN_DELAY_MS));
        debug!(position = %candidate, next = ?schedule.next_spawn_at, "Rose placed");
        return;
    }

    trace!(trials = spawner::SPAWN_TRIALS, "No free tile found for rose, deferring");
}

/// Collects a rose the player is standing on, opening or extending the power window.
pub fn rose_collect_system(
    mut commands: Commands,
    time: Res<GameTime>,
    mut power: ResMut<PowerState>,
    mut score: ResMut<ScoreResource>,
    roses: Query<(Entity, &Position), With<Rose>>,
    players: Query<&Position, With<PlayerControlled>>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (entity, position) in roses.iter() {
        if position != player {
            continue;
        }

        commands.entity(entity).despawn();
        power.extend(time.now, timing::POWER_DURATION);
        score.0 += mechanics::ROSE_SCORE;
        debug!(expires_at = ?power.expires_at, score = score.0, "Rose collected");
    }
}
