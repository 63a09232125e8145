//! Factories for inserting test fixtures with sensible defaults.

pub mod helpers;
pub mod item;
