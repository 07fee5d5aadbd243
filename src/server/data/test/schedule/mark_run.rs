use super::*;

/// Tests recording a schedule run.
///
/// Verifies that `last_run_at` is stored and the schedule is no longer due until its
/// interval has elapsed.
///
/// Expected: Ok, schedule not due right after the run
#[tokio::test]
async fn marks_schedule_as_run() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_schedule(db, "100").await?;
    let run_at = Utc::now() - Duration::minutes(5);

    let repo = BackupScheduleRepository::new(db);
    repo.mark_run(created.id, run_at).await?;

    let schedule = repo.get_by_guild(100).await?.unwrap();
    let last_run_at = schedule.last_run_at.unwrap();

    assert_eq!(last_run_at.timestamp(), run_at.timestamp());
    assert!(!schedule.is_due(Utc::now()));
    assert!(schedule.is_due(Utc::now() + Duration::days(1)));

    Ok(())
}
