use super::*;

/// Tests deleting an owned snapshot.
///
/// Expected: Ok and the snapshot is gone
#[tokio::test]
async fn deletes_owned_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_snapshot(db, "100", "200").await?;
    let kept = factory::create_snapshot(db, "100", "200").await?;

    let repo = SnapshotRepository::new(db);
    repo.delete(&created.id, 100, 200).await?;

    let remaining = repo.list(100, 200).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);

    Ok(())
}

/// Tests that a user can't delete someone else's snapshot.
///
/// Expected: Err(NotFound) and the snapshot still exists
#[tokio::test]
async fn refuses_to_delete_foreign_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_snapshot(db, "100", "200").await?;

    let repo = SnapshotRepository::new(db);
    let result = repo.delete(&created.id, 100, 999).await;

    assert!(matches!(
        result,
        Err(AppError::BackupErr(BackupError::NotFound { .. }))
    ));
    assert!(repo.get(&created.id, 100, 200).await.is_ok());

    Ok(())
}

/// Tests deleting an unknown ID.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = SnapshotRepository::new(db).delete("missing00000", 100, 200).await;

    assert!(matches!(
        result,
        Err(AppError::BackupErr(BackupError::NotFound { .. }))
    ));

    Ok(())
}
