use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::schedule::{BackupSchedule, Frequency},
};

/// Repository providing database operations for recurring backup schedules.
///
/// A guild has at most one schedule; setting a new one replaces the old owner and
/// frequency.
pub struct BackupScheduleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BackupScheduleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the schedule for a guild.
    ///
    /// Replacing a schedule resets `last_run_at` so the new schedule runs on the next tick.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the schedule belongs to
    /// - `owner_user_id` - User who will own the scheduled snapshots
    /// - `frequency` - How often to run
    ///
    /// # Returns
    /// - `Ok(BackupSchedule)` - The stored schedule
    /// - `Err(AppError::DbErr(_))` - Database error
    pub async fn upsert(
        &self,
        guild_id: u64,
        owner_user_id: u64,
        frequency: Frequency,
    ) -> Result<BackupSchedule, AppError> {
        let model = entity::prelude::BackupSchedule::insert(entity::backup_schedule::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            owner_user_id: ActiveValue::Set(owner_user_id.to_string()),
            frequency: ActiveValue::Set(frequency.as_str().to_string()),
            last_run_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::backup_schedule::Column::GuildId)
                .update_columns([
                    entity::backup_schedule::Column::OwnerUserId,
                    entity::backup_schedule::Column::Frequency,
                    entity::backup_schedule::Column::LastRunAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        BackupSchedule::from_entity(model)
    }

    /// Removes the schedule for a guild.
    ///
    /// # Returns
    /// - `Ok(true)` - A schedule was removed
    /// - `Ok(false)` - The guild had no schedule
    pub async fn delete(&self, guild_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::BackupSchedule::delete_many()
            .filter(entity::backup_schedule::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Option<BackupSchedule>, AppError> {
        entity::prelude::BackupSchedule::find()
            .filter(entity::backup_schedule::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(BackupSchedule::from_entity)
            .transpose()
    }

    /// Gets every schedule, oldest first.
    pub async fn get_all(&self) -> Result<Vec<BackupSchedule>, AppError> {
        entity::prelude::BackupSchedule::find()
            .order_by_asc(entity::backup_schedule::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(BackupSchedule::from_entity)
            .collect()
    }

    /// Records that the schedule was attempted at `run_at`.
    pub async fn mark_run(&self, id: i32, run_at: DateTime<Utc>) -> Result<(), AppError> {
        entity::backup_schedule::ActiveModel {
            id: ActiveValue::Set(id),
            last_run_at: ActiveValue::Set(Some(run_at)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }
}
