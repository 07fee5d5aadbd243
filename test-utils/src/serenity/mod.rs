//! Test factories for creating Serenity API objects.
//!
//! These factories build serenity structs by deserializing JSON shaped like Discord's
//! REST responses, so the same conversion code paths run in tests as in production.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_partial_guild, role_json};
//!
//! let guild = create_test_partial_guild(1, "Test Guild", 99, vec![
//!     role_json(1, "@everyone", 0, 0, false),
//!     role_json(10, "Admin", 5, 8, false),
//! ]);
//! let bot = create_test_member(1, 500, &[10]);
//! ```
//!
//! # Available Factories
//!
//! - `guild::create_test_partial_guild` - PartialGuild as returned by `GET /guilds/{id}`
//! - `role::create_test_role` / `role::role_json` - Roles
//! - `channel::create_test_channel` - GuildChannel
//! - `member::create_test_member` - Member

pub mod channel;
pub mod guild;
pub mod member;
pub mod role;

pub use channel::{create_test_channel, overwrite_json};
pub use guild::create_test_partial_guild;
pub use member::create_test_member;
pub use role::{create_test_role, role_json};
