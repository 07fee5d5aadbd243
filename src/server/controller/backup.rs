use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        backup::{SnapshotDto, SnapshotListDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::backup::BackupService,
        state::AppState,
    },
};

/// Tag for grouping backup endpoints in OpenAPI documentation
pub static BACKUP_TAG: &str = "backup";

/// List the session user's backups of a guild.
///
/// Returns the snapshots newest first together with their count, total size, per-kind
/// breakdown and the remaining quota.
///
/// # Access Control
/// - Logged in user; only snapshots they own are listed
///
/// # Returns
/// - `200 OK` - Snapshots and statistics
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/backups",
    tag = BACKUP_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Snapshots and statistics", body = SnapshotListDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_backups(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;

    let list = BackupService::new(&state.db)
        .list(guild_id, user.discord_id)
        .await?;

    Ok((StatusCode::OK, Json(list.into_dto())))
}

/// Get a single backup's metadata.
///
/// # Access Control
/// - Logged in user who owns the snapshot
///
/// # Returns
/// - `200 OK` - Snapshot metadata
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - No such snapshot owned by the user in this guild
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/backups/{backup_id}",
    tag = BACKUP_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("backup_id" = String, Path, description = "Snapshot ID")
    ),
    responses(
        (status = 200, description = "Snapshot metadata", body = SnapshotDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Snapshot not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_backup(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, backup_id)): Path<(u64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;

    let snapshot = BackupService::new(&state.db)
        .get(&backup_id, guild_id, user.discord_id)
        .await?;

    Ok((StatusCode::OK, Json(snapshot.into_dto())))
}

/// Download a backup as a zip archive.
///
/// The archive holds `backup.json`, `metadata.json` and a `README.txt`.
///
/// # Access Control
/// - Logged in user who owns the snapshot
///
/// # Returns
/// - `200 OK` - `application/zip` attachment
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - No such snapshot owned by the user in this guild
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/backups/{backup_id}/download",
    tag = BACKUP_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("backup_id" = String, Path, description = "Snapshot ID")
    ),
    responses(
        (status = 200, description = "Zip archive of the snapshot", content_type = "application/zip"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Snapshot not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_backup(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, backup_id)): Path<(u64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;

    let archive = BackupService::new(&state.db)
        .export(&backup_id, guild_id, user.discord_id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", archive.file_name),
        ),
    ];

    Ok((StatusCode::OK, headers, archive.bytes))
}

/// Delete a backup.
///
/// # Access Control
/// - Logged in user who owns the snapshot
///
/// # Returns
/// - `204 No Content` - Snapshot deleted
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - No such snapshot owned by the user in this guild
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/backups/{backup_id}",
    tag = BACKUP_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("backup_id" = String, Path, description = "Snapshot ID")
    ),
    responses(
        (status = 204, description = "Snapshot deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Snapshot not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_backup(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, backup_id)): Path<(u64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;

    BackupService::new(&state.db)
        .delete(&backup_id, guild_id, user.discord_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
