pub use super::backup_schedule::Entity as BackupSchedule;
pub use super::guild_snapshot::Entity as GuildSnapshot;
