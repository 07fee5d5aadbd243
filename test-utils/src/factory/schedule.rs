//! Backup schedule factory for creating test schedule rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test backup schedules with customizable fields.
pub struct ScheduleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    owner_user_id: String,
    frequency: String,
    last_run_at: Option<DateTime<Utc>>,
}

impl<'a> ScheduleFactory<'a> {
    /// Creates a new ScheduleFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: unique auto-incremented value
    /// - owner_user_id: `"2000"`
    /// - frequency: `"daily"`
    /// - last_run_at: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            owner_user_id: "2000".to_string(),
            frequency: "daily".to_string(),
            last_run_at: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn owner_user_id(mut self, owner_user_id: impl Into<String>) -> Self {
        self.owner_user_id = owner_user_id.into();
        self
    }

    pub fn frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }

    pub fn last_run_at(mut self, last_run_at: Option<DateTime<Utc>>) -> Self {
        self.last_run_at = last_run_at;
        self
    }

    /// Builds and inserts the schedule row.
    ///
    /// # Returns
    /// - `Ok(entity::backup_schedule::Model)` - Created schedule row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::backup_schedule::Model, DbErr> {
        entity::backup_schedule::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            owner_user_id: ActiveValue::Set(self.owner_user_id),
            frequency: ActiveValue::Set(self.frequency),
            last_run_at: ActiveValue::Set(self.last_run_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a daily schedule for a guild.
pub async fn create_schedule(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::backup_schedule::Model, DbErr> {
    ScheduleFactory::new(db).guild_id(guild_id).build().await
}
