use super::*;

/// Tests listing every schedule.
///
/// Expected: Ok with all schedules and their parsed frequencies
#[tokio::test]
async fn gets_all_schedules() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::schedule::ScheduleFactory::new(db)
        .guild_id("100")
        .frequency("daily")
        .build()
        .await?;
    factory::schedule::ScheduleFactory::new(db)
        .guild_id("101")
        .frequency("monthly")
        .build()
        .await?;

    let schedules = BackupScheduleRepository::new(db).get_all().await?;

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0].frequency, Frequency::Daily);
    assert_eq!(schedules[1].frequency, Frequency::Monthly);

    Ok(())
}

/// Tests that an unknown stored frequency surfaces as an internal error.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn fails_on_unknown_frequency() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::schedule::ScheduleFactory::new(db)
        .guild_id("100")
        .frequency("hourly")
        .build()
        .await?;

    let result = BackupScheduleRepository::new(db).get_all().await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
