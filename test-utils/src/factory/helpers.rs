//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Inserts `count` default snapshots for one owner in one guild.
///
/// Useful for filling an owner's quota before exercising the limit.
///
/// # Returns
/// - `Ok(Vec<Model>)` - Created snapshot rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_snapshots_for_owner(
    db: &DatabaseConnection,
    guild_id: &str,
    owner_user_id: &str,
    count: usize,
) -> Result<Vec<entity::guild_snapshot::Model>, DbErr> {
    let mut snapshots = Vec::with_capacity(count);
    for _ in 0..count {
        snapshots.push(crate::factory::snapshot::create_snapshot(db, guild_id, owner_user_id).await?);
    }

    Ok(snapshots)
}
