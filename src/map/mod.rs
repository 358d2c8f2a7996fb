//! The maze: authoring table, ASCII boards, and the validated tile grid the systems read.

pub mod builder;
pub mod direction;
pub mod layout;
pub mod parser;
