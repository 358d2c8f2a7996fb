//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources. Each gameplay system covers one stage of the tick.

pub mod collision;
pub mod components;
pub mod ghost;
pub mod heart;
pub mod input;
pub mod player;
pub mod rose;
pub mod state;

pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::heart::*;
pub use self::input::*;
pub use self::player::*;
pub use self::rose::*;
pub use self::state::*;
