//! Clan Storage Test Utils
//!
//! Shared testing utilities for the clan storage bot. This crate offers a
//! builder pattern for creating test contexts with in-memory SQLite databases
//! plus factories for inserting item fixtures.
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Item;
//!
//! #[tokio::test]
//! async fn test_item_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Item)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
