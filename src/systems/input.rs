use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, ResMut},
};
use tracing::{debug, trace};

use crate::{
    error::GameError,
    events::{GameCommand, GameEvent},
    systems::{BufferedDirection, GlobalState, PlayerControlled, RestartRequested},
};

/// Processes input commands queued since the previous tick.
///
/// Movement commands only overwrite the player's buffered direction, so when several
/// arrive between ticks the last one wins. Restart is deferred to the restart system
/// that runs right after this one, which replays any move queued after the restart.
/// Exit is recorded for the front end.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut restart: ResMut<RestartRequested>,
    mut players: Query<&mut BufferedDirection, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::MovePlayer(direction) => {
                let mut buffered = match players.single_mut() {
                    Ok(buffered) => buffered,
                    Err(e) => {
                        errors.write(GameError::InvalidState(format!(
                            "No/multiple entities queried for player system: {}",
                            e
                        )));
                        return;
                    }
                };
                trace!(direction = ?direction, "Buffered direction");
                buffered.0 = *direction;
                if restart.pending {
                    restart.direction = Some(*direction);
                }
            }
            GameCommand::Restart => {
                debug!("Restart requested");
                restart.pending = true;
                restart.direction = None;
            }
            GameCommand::Exit => {
                debug!("Exit requested");
                state.exit = true;
            }
        }
    }
}
