//! Factory methods for creating test data.
//!
//! Each factory has a builder struct for customization and a `create_*` convenience
//! function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let snapshot = factory::snapshot::SnapshotFactory::new(&db)
//!     .guild_id("1")
//!     .owner_user_id("2")
//!     .kind("full")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `snapshot` - Create guild snapshot rows
//! - `schedule` - Create backup schedule rows
//! - `helpers` - Shared ID generation and bulk helpers

pub mod helpers;
pub mod schedule;
pub mod snapshot;

pub use schedule::create_schedule;
pub use snapshot::create_snapshot;
