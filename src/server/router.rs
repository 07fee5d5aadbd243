use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::ErrorDto,
        backup::{KindCountDto, SnapshotDto, SnapshotListDto, SnapshotStatsDto},
        user::UserDto,
    },
    server::{
        controller::{
            auth::{self, callback, get_user, login, logout},
            backup::{self, delete_backup, download_backup, get_backup, list_backups},
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "guildvault", description = "Discord guild backup dashboard API"),
    paths(
        auth::login,
        auth::callback,
        auth::logout,
        auth::get_user,
        backup::list_backups,
        backup::get_backup,
        backup::download_backup,
        backup::delete_backup,
    ),
    components(schemas(
        ErrorDto,
        UserDto,
        SnapshotDto,
        SnapshotListDto,
        SnapshotStatsDto,
        KindCountDto
    )),
    tags(
        (name = "auth", description = "Discord OAuth2 login"),
        (name = "backup", description = "Snapshots owned by the logged in user")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/api/auth/login", get(login))
        .route("/api/auth/callback", get(callback))
        .route("/api/auth/logout", get(logout))
        .route("/api/auth/user", get(get_user))
        .route("/api/guilds/{guild_id}/backups", get(list_backups))
        .route(
            "/api/guilds/{guild_id}/backups/{backup_id}",
            get(get_backup).delete(delete_backup),
        )
        .route(
            "/api/guilds/{guild_id}/backups/{backup_id}/download",
            get(download_backup),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that every dashboard route is documented.
    ///
    /// Expected: auth and backup paths present in the OpenAPI document
    #[test]
    fn documents_all_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/auth/login",
            "/api/auth/callback",
            "/api/auth/logout",
            "/api/auth/user",
            "/api/guilds/{guild_id}/backups",
            "/api/guilds/{guild_id}/backups/{backup_id}",
            "/api/guilds/{guild_id}/backups/{backup_id}/download",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }
}
