//! Guild snapshot factory for creating test snapshot rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::{factory::helpers::next_id, fixture::payload};

/// Factory for creating test guild snapshots with customizable fields.
///
/// The default payload is a `roles` payload with two roles. When `kind` is changed
/// the payload must be changed to match, otherwise the application will reject the
/// row as invalid.
pub struct SnapshotFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    guild_id: String,
    guild_name: String,
    owner_user_id: String,
    kind: String,
    description: Option<String>,
    payload: String,
    created_at: DateTime<Utc>,
}

impl<'a> SnapshotFactory<'a> {
    /// Creates a new SnapshotFactory with default values.
    ///
    /// Defaults:
    /// - id: `"snap{id:08}"` where id is auto-incremented
    /// - guild_id: `"1000"`, owner_user_id: `"2000"`
    /// - kind: `"roles"` with a matching two-role payload
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("snap{:08}", id),
            guild_id: "1000".to_string(),
            guild_name: payload::DEFAULT_GUILD_NAME.to_string(),
            owner_user_id: "2000".to_string(),
            kind: "roles".to_string(),
            description: None,
            payload: payload::roles_payload(&["Admin", "Member"])
                .to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn guild_name(mut self, guild_name: impl Into<String>) -> Self {
        self.guild_name = guild_name.into();
        self
    }

    pub fn owner_user_id(mut self, owner_user_id: impl Into<String>) -> Self {
        self.owner_user_id = owner_user_id.into();
        self
    }

    /// Sets the stored kind. Pair with `payload()` to keep the row consistent.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the raw payload JSON text.
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the snapshot row.
    ///
    /// `size_bytes` is the byte length of the payload text.
    ///
    /// # Returns
    /// - `Ok(entity::guild_snapshot::Model)` - Created snapshot row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_snapshot::Model, DbErr> {
        entity::guild_snapshot::ActiveModel {
            id: ActiveValue::Set(self.id),
            guild_id: ActiveValue::Set(self.guild_id),
            guild_name: ActiveValue::Set(self.guild_name),
            owner_user_id: ActiveValue::Set(self.owner_user_id),
            kind: ActiveValue::Set(self.kind),
            description: ActiveValue::Set(self.description),
            size_bytes: ActiveValue::Set(self.payload.len() as i64),
            payload: ActiveValue::Set(self.payload),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default snapshot for an owner in a guild.
///
/// Shorthand for `SnapshotFactory::new(db).guild_id(..).owner_user_id(..).build()`.
pub async fn create_snapshot(
    db: &DatabaseConnection,
    guild_id: &str,
    owner_user_id: &str,
) -> Result<entity::guild_snapshot::Model, DbErr> {
    SnapshotFactory::new(db)
        .guild_id(guild_id)
        .owner_user_id(owner_user_id)
        .build()
        .await
}
