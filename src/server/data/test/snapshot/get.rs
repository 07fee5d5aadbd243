use super::*;

/// Tests getting a snapshot owned by the caller.
///
/// Expected: Ok with the decoded payload
#[tokio::test]
async fn gets_owned_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_snapshot(db, "100", "200").await?;

    let snapshot = SnapshotRepository::new(db).get(&created.id, 100, 200).await?;

    assert_eq!(snapshot.id, created.id);
    assert_eq!(snapshot.kind, SnapshotKind::Roles);
    assert_eq!(snapshot.payload.roles()[0].name, "Admin");

    Ok(())
}

/// Tests ownership isolation on lookup.
///
/// Verifies that another user in the same guild, or the owner in a different guild,
/// gets NotFound rather than the snapshot.
///
/// Expected: Err(NotFound) for both
#[tokio::test]
async fn hides_snapshot_from_other_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_snapshot(db, "100", "200").await?;
    let repo = SnapshotRepository::new(db);

    let other_user = repo.get(&created.id, 100, 999).await;
    let other_guild = repo.get(&created.id, 101, 200).await;

    assert!(matches!(
        other_user,
        Err(AppError::BackupErr(BackupError::NotFound { .. }))
    ));
    assert!(matches!(
        other_guild,
        Err(AppError::BackupErr(BackupError::NotFound { .. }))
    ));

    Ok(())
}

/// Tests that a stored payload whose tag disagrees with the kind column is rejected.
///
/// Expected: Err(InvalidSnapshot)
#[tokio::test]
async fn rejects_inconsistent_payload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::snapshot::SnapshotFactory::new(db)
        .guild_id("100")
        .owner_user_id("200")
        .kind("full")
        .build()
        .await?;

    let result = SnapshotRepository::new(db).get(&created.id, 100, 200).await;

    assert!(matches!(
        result,
        Err(AppError::BackupErr(BackupError::InvalidSnapshot(_)))
    ));

    Ok(())
}
