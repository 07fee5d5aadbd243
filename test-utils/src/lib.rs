//! Guildvault Test Utils
//!
//! Shared testing utilities for the guildvault crates. Provides a builder for test
//! contexts backed by in-memory SQLite databases, factories that insert snapshot and
//! schedule rows, fixtures for snapshot payload JSON, and serenity object fixtures
//! deserialized from JSON the way Discord's API returns them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_snapshots() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_snapshot_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     factory::snapshot::create_snapshot(db, "1", "2").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod serenity;
