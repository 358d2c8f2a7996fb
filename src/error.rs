//! Centralized error types for the game.
//!
//! Moving into a wall, a spawner that defers, and running out of lives or pellets
//! are ordinary gameplay and never surface here. Errors are reserved for malformed
//! boards and for world state that the systems cannot make sense of.

use std::io;

use bevy_ecs::event::Event;
use glam::IVec2;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// Systems also emit it as an event instead of panicking on inconsistent state.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board has no rows")]
    EmptyBoard,
    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board has no player start ('X')")]
    MissingPlayerStart,
    #[error("Board has more than one player start, second at {0}")]
    MultiplePlayerStarts(IVec2),
}

/// Errors raised while validating a layout into a playable map.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Layout is {width}x{height} but holds {tiles} tiles")]
    DimensionMismatch { width: u32, height: u32, tiles: usize },

    #[error("Border tile at {0} is not a wall")]
    OpenBorder(IVec2),

    #[error("Spawn {0} lies outside the board")]
    SpawnOutOfBounds(IVec2),

    #[error("Player spawn {0} must be a floor tile")]
    PlayerSpawnNotFloor(IVec2),

    #[error("Ghost spawn {0} is inside a wall")]
    SpawnInWall(IVec2),

    #[error("Ghost spawn {0} cannot be reached from the player spawn")]
    UnreachableSpawn(IVec2),

    #[error("Pellet at {0} cannot be reached from the player spawn")]
    UnreachablePellet(IVec2),

    #[error("Layout has no pellets, so it can never be won")]
    NoPellets,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
