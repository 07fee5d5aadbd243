use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::schedule::BackupScheduleRepository,
    error::AppError,
    model::{
        schedule::{BackupSchedule, Frequency},
        snapshot::SnapshotKind,
    },
    service::backup::{gateway::GuildGateway, BackupService},
};

pub struct BackupScheduleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BackupScheduleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the guild's recurring backup, replacing any existing schedule.
    pub async fn set(
        &self,
        guild_id: u64,
        owner_user_id: u64,
        frequency: Frequency,
    ) -> Result<BackupSchedule, AppError> {
        let schedule = BackupScheduleRepository::new(self.db)
            .upsert(guild_id, owner_user_id, frequency)
            .await?;

        tracing::info!(
            "Guild {} now has {} backups owned by user {}",
            guild_id,
            frequency,
            owner_user_id
        );

        Ok(schedule)
    }

    /// Removes the guild's recurring backup.
    ///
    /// # Returns
    /// - `Ok(true)` - A schedule was removed
    /// - `Ok(false)` - The guild had no schedule
    pub async fn disable(&self, guild_id: u64) -> Result<bool, AppError> {
        BackupScheduleRepository::new(self.db).delete(guild_id).await
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<BackupSchedule>, AppError> {
        BackupScheduleRepository::new(self.db)
            .get_by_guild(guild_id)
            .await
    }

    /// Creates a full snapshot for every schedule that is due at `now`.
    ///
    /// Each attempt is recorded as the schedule's last run whether or not it succeeded,
    /// so a failing guild is retried on its next interval rather than every tick.
    /// An owner at their snapshot quota is logged and skipped.
    ///
    /// # Arguments
    /// - `now` - Reference time for due checks and the recorded run time
    /// - `gateway_for` - Builds a gateway for a guild id
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of snapshots created
    /// - `Err(AppError)` - Loading or updating schedules failed
    pub async fn run_due<G, F>(&self, now: DateTime<Utc>, gateway_for: F) -> Result<usize, AppError>
    where
        G: GuildGateway,
        F: Fn(u64) -> G,
    {
        let repo = BackupScheduleRepository::new(self.db);
        let backups = BackupService::new(self.db);
        let mut created = 0;

        for schedule in repo.get_all().await? {
            if !schedule.is_due(now) {
                continue;
            }

            let gateway = gateway_for(schedule.guild_id);
            let result = backups
                .create(
                    &gateway,
                    schedule.owner_user_id,
                    SnapshotKind::Full,
                    Some(schedule.snapshot_description()),
                )
                .await;

            match result {
                Ok(snapshot) => {
                    tracing::info!(
                        "Scheduled backup {} created for guild {}",
                        snapshot.id,
                        schedule.guild_id
                    );
                    created += 1;
                }
                Err(AppError::BackupErr(err)) => {
                    tracing::warn!(
                        "Skipping scheduled backup for guild {}: {}",
                        schedule.guild_id,
                        err
                    );
                }
                Err(err) => {
                    tracing::error!(
                        "Scheduled backup for guild {} failed: {}",
                        schedule.guild_id,
                        err
                    );
                }
            }

            repo.mark_run(schedule.id, now).await?;
        }

        Ok(created)
    }
}
