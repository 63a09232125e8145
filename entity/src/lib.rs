//! SeaORM entity definitions for the clan storage database.

pub mod item;
pub mod prelude;
