use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{backup::gateway::SerenityGuildGateway, schedule::BackupScheduleService},
};

/// Runs at the top of every hour.
const BACKUP_SCHEDULE_CRON: &str = "0 0 * * * *";

/// Starts the recurring backup scheduler
///
/// Every hour, each guild schedule whose interval has elapsed gets a new full snapshot
/// owned by the schedule's owner.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client used to read the scheduled guilds
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_http = discord_http.clone();

    let job = Job::new_async(BACKUP_SCHEDULE_CRON, move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();

        Box::pin(async move {
            if let Err(e) = process_backup_schedules(&db, http).await {
                tracing::error!("Error processing backup schedules: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Backup schedule scheduler started");

    Ok(())
}

async fn process_backup_schedules(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let created = BackupScheduleService::new(db)
        .run_due(Utc::now(), |guild_id| {
            SerenityGuildGateway::new(discord_http.clone(), guild_id)
        })
        .await?;

    if created > 0 {
        tracing::info!("Created {} scheduled backups", created);
    } else {
        tracing::debug!("No backup schedules due");
    }

    Ok(())
}
