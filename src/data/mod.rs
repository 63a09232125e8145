//! Database repository layer.
//!
//! Repositories handle database operations for the local SQLite mirror using
//! SeaORM entity models internally and returning domain models to the rest
//! of the application.

pub mod item;

pub use item::ItemRepository;

#[cfg(test)]
mod test;
