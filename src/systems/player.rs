use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{info, trace};

use crate::{
    constants::mechanics,
    error::GameError,
    map::builder::Map,
    systems::{BufferedDirection, Facing, GameStage, PelletCount, PlayerControlled, Position, ScoreResource},
};

/// Moves the player one tile.
///
/// The buffered direction is committed only when the tile it points at is open, so
/// a turn requested early is taken at the next opening. The player then steps in
/// the committed direction, or stays put against a wall.
pub fn player_movement_system(
    map: Res<Map>,
    mut players: Query<(&mut Position, &mut Facing, &BufferedDirection), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (mut position, mut facing, buffered) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player movement: {}",
                e
            )));
            return;
        }
    };

    if facing.0 != buffered.0 && map.step(position.0, buffered.0).is_some() {
        trace!(from = ?facing.0, to = ?buffered.0, "Player turned");
        facing.0 = buffered.0;
    }

    if let Some(next) = map.step(position.0, facing.0) {
        position.0 = next;
    }
}

/// Eats the pellet under the player, if any, and declares the win once none are left.
pub fn pellet_system(
    mut map: ResMut<Map>,
    mut score: ResMut<ScoreResource>,
    mut pellets: ResMut<PelletCount>,
    mut stage: ResMut<GameStage>,
    players: Query<&Position, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let position = match players.single() {
        Ok(position) => position,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for pellet system: {}",
                e
            )));
            return;
        }
    };

    if !map.consume_pellet(position.0) {
        return;
    }

    score.0 += mechanics::PELLET_SCORE;
    pellets.0 = pellets.0.saturating_sub(1);
    trace!(remaining = pellets.0, score = score.0, "Pellet eaten");

    if pellets.0 == 0 {
        *stage = GameStage::Won;
        info!(score = score.0, "All pellets eaten, game won");
    }
}
