use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    error::{backup::BackupError, AppError},
    model::snapshot::{CreateSnapshotParam, Snapshot, MAX_SNAPSHOTS_PER_OWNER},
};

/// Length of generated snapshot identifiers.
const SNAPSHOT_ID_LEN: usize = 12;

/// Repository providing database operations for guild snapshots.
///
/// Every lookup is scoped by guild and owner, so a snapshot owned by another user
/// behaves exactly like a missing one.
pub struct SnapshotRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SnapshotRepository<'a> {
    /// Creates a new SnapshotRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `SnapshotRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new snapshot if the owner is under quota.
    ///
    /// The quota check and the insert run in one transaction. The stored size is the
    /// byte length of the compact JSON payload.
    ///
    /// # Arguments
    /// - `param` - Guild, owner, description and payload of the new snapshot
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - The stored snapshot with its generated ID and size
    /// - `Err(AppError::BackupErr(QuotaExceeded))` - Owner already holds the maximum
    /// - `Err(AppError::DbErr(_))` - Database error
    pub async fn create(&self, param: CreateSnapshotParam) -> Result<Snapshot, AppError> {
        let payload = param.payload.encode()?;
        let guild_id = param.guild_id.to_string();
        let owner_user_id = param.owner_user_id.to_string();

        let txn = self.db.begin().await?;

        let existing = entity::prelude::GuildSnapshot::find()
            .filter(entity::guild_snapshot::Column::GuildId.eq(&guild_id))
            .filter(entity::guild_snapshot::Column::OwnerUserId.eq(&owner_user_id))
            .count(&txn)
            .await?;

        if existing >= MAX_SNAPSHOTS_PER_OWNER {
            txn.rollback().await?;
            return Err(BackupError::QuotaExceeded {
                limit: MAX_SNAPSHOTS_PER_OWNER,
            }
            .into());
        }

        let model = entity::guild_snapshot::ActiveModel {
            id: ActiveValue::Set(generate_snapshot_id()),
            guild_id: ActiveValue::Set(guild_id),
            guild_name: ActiveValue::Set(param.guild_name),
            owner_user_id: ActiveValue::Set(owner_user_id),
            kind: ActiveValue::Set(param.payload.kind().as_str().to_string()),
            description: ActiveValue::Set(param.description),
            size_bytes: ActiveValue::Set(payload.len() as i64),
            payload: ActiveValue::Set(payload),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Snapshot::from_entity(model)
    }

    /// Lists the owner's snapshots in a guild, newest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Snapshot>)` - Snapshots ordered by creation time descending
    /// - `Err(AppError)` - Database error or unreadable stored snapshot
    pub async fn list(&self, guild_id: u64, owner_user_id: u64) -> Result<Vec<Snapshot>, AppError> {
        entity::prelude::GuildSnapshot::find()
            .filter(entity::guild_snapshot::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_snapshot::Column::OwnerUserId.eq(owner_user_id.to_string()))
            .order_by_desc(entity::guild_snapshot::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Snapshot::from_entity)
            .collect()
    }

    /// Gets a single snapshot owned by the caller in a guild.
    ///
    /// # Returns
    /// - `Ok(Snapshot)` - The matching snapshot
    /// - `Err(AppError::BackupErr(NotFound))` - Missing, in another guild, or owned by
    ///   someone else
    pub async fn get(
        &self,
        id: &str,
        guild_id: u64,
        owner_user_id: u64,
    ) -> Result<Snapshot, AppError> {
        let model = entity::prelude::GuildSnapshot::find_by_id(id.to_string())
            .filter(entity::guild_snapshot::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_snapshot::Column::OwnerUserId.eq(owner_user_id.to_string()))
            .one(self.db)
            .await?
            .ok_or_else(|| BackupError::NotFound { id: id.to_string() })?;

        Snapshot::from_entity(model)
    }

    /// Deletes exactly one snapshot owned by the caller in a guild.
    ///
    /// # Returns
    /// - `Ok(())` - Snapshot removed
    /// - `Err(AppError::BackupErr(NotFound))` - Nothing matched
    pub async fn delete(&self, id: &str, guild_id: u64, owner_user_id: u64) -> Result<(), AppError> {
        let result = entity::prelude::GuildSnapshot::delete_many()
            .filter(entity::guild_snapshot::Column::Id.eq(id))
            .filter(entity::guild_snapshot::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_snapshot::Column::OwnerUserId.eq(owner_user_id.to_string()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(BackupError::NotFound { id: id.to_string() }.into());
        }

        Ok(())
    }

    /// Counts the owner's snapshots in a guild.
    pub async fn count_for_owner(&self, guild_id: u64, owner_user_id: u64) -> Result<u64, AppError> {
        let count = entity::prelude::GuildSnapshot::find()
            .filter(entity::guild_snapshot::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_snapshot::Column::OwnerUserId.eq(owner_user_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count)
    }
}

fn generate_snapshot_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SNAPSHOT_ID_LEN)
        .map(char::from)
        .collect()
}
