use crate::server::{
    data::snapshot::SnapshotRepository,
    error::{backup::BackupError, AppError},
    model::snapshot::{CreateSnapshotParam, SnapshotKind, SnapshotPayload},
};
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory, fixture};

mod count_for_owner;
mod create;
mod delete;
mod get;
mod list;

fn roles_payload(role_names: &[&str]) -> SnapshotPayload {
    serde_json::from_value(fixture::payload::roles_payload(role_names)).unwrap()
}

fn create_param(guild_id: u64, owner_user_id: u64) -> CreateSnapshotParam {
    CreateSnapshotParam {
        guild_id,
        guild_name: "Test Guild".to_string(),
        owner_user_id,
        description: Some("before event".to_string()),
        payload: roles_payload(&["Admin", "Member"]),
    }
}
