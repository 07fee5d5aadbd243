use super::*;

/// Tests creating a schedule for a guild without one.
///
/// Expected: Ok with a schedule that has never run
#[tokio::test]
async fn creates_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = BackupScheduleRepository::new(db)
        .upsert(100, 200, Frequency::Weekly)
        .await?;

    assert_eq!(schedule.guild_id, 100);
    assert_eq!(schedule.owner_user_id, 200);
    assert_eq!(schedule.frequency, Frequency::Weekly);
    assert!(schedule.last_run_at.is_none());

    Ok(())
}

/// Tests that a guild keeps a single schedule.
///
/// Verifies that setting a schedule for a guild that already has one replaces the
/// owner and frequency and clears the last run.
///
/// Expected: Ok with one row holding the new values
#[tokio::test]
async fn replaces_existing_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::schedule::ScheduleFactory::new(db)
        .guild_id("100")
        .owner_user_id("200")
        .frequency("daily")
        .last_run_at(Some(Utc::now()))
        .build()
        .await?;

    let schedule = BackupScheduleRepository::new(db)
        .upsert(100, 201, Frequency::Monthly)
        .await?;

    assert_eq!(schedule.owner_user_id, 201);
    assert_eq!(schedule.frequency, Frequency::Monthly);
    assert!(schedule.last_run_at.is_none());

    let count = entity::prelude::BackupSchedule::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
