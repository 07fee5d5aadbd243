//! SeaORM entity models for the guildvault database.

pub mod prelude;

pub mod backup_schedule;
pub mod guild_snapshot;
