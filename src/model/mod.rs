//! Domain models shared across the store, bot, and notifier layers.

pub mod item;

pub use item::{Item, ItemType, NewItem};
