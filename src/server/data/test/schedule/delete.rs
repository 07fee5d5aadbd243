use super::*;

/// Tests removing a guild's schedule.
///
/// Expected: Ok(true) and no schedule left
#[tokio::test]
async fn deletes_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_schedule(db, "100").await?;

    let repo = BackupScheduleRepository::new(db);
    let removed = repo.delete(100).await?;

    assert!(removed);
    assert!(repo.get_by_guild(100).await?.is_none());

    Ok(())
}

/// Tests removing a schedule that doesn't exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let removed = BackupScheduleRepository::new(db).delete(100).await?;

    assert!(!removed);

    Ok(())
}
