//! Pac-Man style arcade game library crate.

pub mod app;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod snapshot;
pub mod systems;
pub mod time;
