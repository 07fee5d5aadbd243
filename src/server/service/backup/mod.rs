//! Guild backup engine.
//!
//! `BackupService` ties the snapshot store to a live guild reached through a
//! `GuildGateway`:
//!
//! - `serializer` captures a guild's state as a payload
//! - `planner` previews what a restore would add and update
//! - `executor` applies a payload to a guild, collecting per-item failures
//! - `packaging` bundles a snapshot into a zip archive

pub mod executor;
pub mod gateway;
pub mod packaging;
pub mod planner;
pub mod serializer;

#[cfg(test)]
pub mod fake;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::snapshot::SnapshotRepository,
    error::AppError,
    model::{
        restore::{RestorePlan, RestoreReport},
        snapshot::{
            CreateSnapshotParam, Snapshot, SnapshotKind, SnapshotList, SnapshotStats,
            MAX_SNAPSHOTS_PER_OWNER,
        },
    },
    service::backup::{gateway::GuildGateway, packaging::ExportedArchive},
};

pub struct BackupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BackupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Captures the guild behind `gateway` and stores it as a new snapshot.
    ///
    /// # Arguments
    /// - `gateway` - Access to the guild being captured
    /// - `owner_user_id` - User who will own the snapshot
    /// - `kind` - Sections to capture
    /// - `description` - Optional label supplied by the owner
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - The stored snapshot
    /// - `Err(AppError::BackupErr(QuotaExceeded))` - Owner already holds the maximum
    /// - `Err(AppError)` - Reading the guild or storing the snapshot failed
    pub async fn create(
        &self,
        gateway: &dyn GuildGateway,
        owner_user_id: u64,
        kind: SnapshotKind,
        description: Option<String>,
    ) -> Result<Snapshot, AppError> {
        let state = gateway.fetch_state().await?;
        let payload = serializer::serialize(&state, kind);

        let repo = SnapshotRepository::new(self.db);
        let snapshot = repo
            .create(CreateSnapshotParam {
                guild_id: state.guild_id,
                guild_name: state.name,
                owner_user_id,
                description,
                payload,
            })
            .await?;

        let used = repo
            .count_for_owner(snapshot.guild_id, owner_user_id)
            .await?;

        tracing::info!(
            "Created {} backup {} for guild {} ({} bytes, {}/{} used)",
            snapshot.kind,
            snapshot.id,
            snapshot.guild_id,
            snapshot.size_bytes,
            used,
            MAX_SNAPSHOTS_PER_OWNER
        );

        Ok(snapshot)
    }

    /// Lists the owner's snapshots in a guild, newest first, with aggregate statistics.
    pub async fn list(&self, guild_id: u64, owner_user_id: u64) -> Result<SnapshotList, AppError> {
        let snapshots = SnapshotRepository::new(self.db)
            .list(guild_id, owner_user_id)
            .await?;
        let stats = SnapshotStats::from_snapshots(&snapshots);

        Ok(SnapshotList { snapshots, stats })
    }

    pub async fn get(
        &self,
        id: &str,
        guild_id: u64,
        owner_user_id: u64,
    ) -> Result<Snapshot, AppError> {
        SnapshotRepository::new(self.db)
            .get(id, guild_id, owner_user_id)
            .await
    }

    pub async fn delete(&self, id: &str, guild_id: u64, owner_user_id: u64) -> Result<(), AppError> {
        SnapshotRepository::new(self.db)
            .delete(id, guild_id, owner_user_id)
            .await?;

        tracing::info!("Deleted backup {} in guild {}", id, guild_id);

        Ok(())
    }

    /// Previews restoring one of the owner's snapshots into the guild behind `gateway`.
    ///
    /// # Returns
    /// - `Ok((Snapshot, RestorePlan))` - The snapshot and its change counts
    /// - `Err(AppError::BackupErr(NotFound))` - Snapshot missing or not owned by the caller
    pub async fn preview(
        &self,
        gateway: &dyn GuildGateway,
        id: &str,
        guild_id: u64,
        owner_user_id: u64,
    ) -> Result<(Snapshot, RestorePlan), AppError> {
        let snapshot = self.get(id, guild_id, owner_user_id).await?;
        let state = gateway.fetch_state().await?;
        let plan = planner::plan(&state, &snapshot.payload);

        Ok((snapshot, plan))
    }

    /// Restores one of the owner's snapshots into the guild behind `gateway`.
    ///
    /// # Returns
    /// - `Ok(RestoreReport)` - Counts and item errors; errors mean partial success
    /// - `Err(AppError::BackupErr(NotFound))` - Snapshot missing or not owned by the caller
    /// - `Err(AppError::BackupErr(InsufficientPermissions))` - Bot lacks capabilities
    pub async fn restore(
        &self,
        gateway: &dyn GuildGateway,
        id: &str,
        guild_id: u64,
        owner_user_id: u64,
    ) -> Result<RestoreReport, AppError> {
        let snapshot = self.get(id, guild_id, owner_user_id).await?;

        tracing::info!(
            "Restoring {} backup {} into guild {}",
            snapshot.kind,
            snapshot.id,
            guild_id
        );

        executor::execute(gateway, &snapshot.payload).await
    }

    /// Packages one of the owner's snapshots as a zip archive.
    pub async fn export(
        &self,
        id: &str,
        guild_id: u64,
        owner_user_id: u64,
    ) -> Result<ExportedArchive, AppError> {
        let snapshot = self.get(id, guild_id, owner_user_id).await?;

        packaging::package(&snapshot)
    }
}
