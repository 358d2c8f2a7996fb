//! Ghost pursuit.

use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    resource::Resource,
    system::{Query, Res},
};
use glam::IVec2;
use smallvec::SmallVec;

use crate::{
    error::GameError,
    map::{builder::Map, direction::Direction},
    systems::{Ghost, PlayerControlled, Position},
};

/// Picks the direction a ghost tries to move in this tick.
pub trait PursuitPolicy: Send + Sync {
    fn choose_direction(&self, map: &Map, from: IVec2, target: IVec2) -> Direction;
}

/// Greedy pursuit with no memory.
///
/// Ranks the four directions by the Manhattan distance from the tile they lead to
/// to the target, keeping [`Direction::PURSUIT_ORDER`] for ties, and takes the best
/// one that is not a wall. When boxed in on all sides it answers `Left`, which the
/// movement step then rejects.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPursuit;

impl PursuitPolicy for GreedyPursuit {
    fn choose_direction(&self, map: &Map, from: IVec2, target: IVec2) -> Direction {
        let mut candidates: SmallVec<[(Direction, IVec2); 4]> = Direction::PURSUIT_ORDER
            .into_iter()
            .map(|direction| (direction, from + direction.as_ivec2()))
            .collect();
        // Stable, so ties keep the pursuit order.
        candidates.sort_by_key(|(_, next)| manhattan(*next, target));

        candidates
            .into_iter()
            .find(|(_, next)| !map.is_wall(*next))
            .map_or(Direction::Left, |(direction, _)| direction)
    }
}

pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// The pursuit policy every ghost uses.
#[derive(Resource)]
pub struct Pursuit(pub Box<dyn PursuitPolicy>);

impl Default for Pursuit {
    fn default() -> Self {
        Self(Box::new(GreedyPursuit))
    }
}

/// Moves every ghost one tile toward the player, as chosen by the pursuit policy.
pub fn ghost_movement_system(
    map: Res<Map>,
    pursuit: Res<Pursuit>,
    players: Query<&Position, With<PlayerControlled>>,
    mut ghosts: Query<&mut Position, (With<Ghost>, Without<PlayerControlled>)>,
    mut errors: EventWriter<GameError>,
) {
    let target = match players.single() {
        Ok(position) => position.0,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for ghost movement: {}",
                e
            )));
            return;
        }
    };

    for mut position in ghosts.iter_mut() {
        let direction = pursuit.0.choose_direction(&map, position.0, target);
        if let Some(next) = map.step(position.0, direction) {
            position.0 = next;
        }
    }
}
