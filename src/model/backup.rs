use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{deserialize_u64_from_string, serialize_u64_as_string};

/// Snapshot metadata as exposed by the dashboard API.
///
/// The payload itself is only available through the download endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotDto {
    pub id: String,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub guild_id: u64,
    pub guild_name: String,
    pub kind: String,
    pub description: Option<String>,
    /// Capture time in epoch milliseconds.
    pub created_at: i64,
    pub size_bytes: u64,
    pub role_count: usize,
    pub channel_count: usize,
    pub emoji_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KindCountDto {
    pub kind: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotStatsDto {
    pub count: u64,
    pub total_size_bytes: u64,
    pub by_kind: Vec<KindCountDto>,
    pub remaining_quota: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotListDto {
    pub snapshots: Vec<SnapshotDto>,
    pub stats: SnapshotStatsDto,
}
