use super::*;

/// Tests creating a snapshot for an owner with no existing snapshots.
///
/// Verifies that the repository generates a 12 character alphanumeric ID, stores the
/// kind derived from the payload, and records the payload size.
///
/// Expected: Ok with snapshot created
#[tokio::test]
async fn creates_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SnapshotRepository::new(db);
    let snapshot = repo.create(create_param(100, 200)).await?;

    assert_eq!(snapshot.id.len(), 12);
    assert!(snapshot.id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(snapshot.guild_id, 100);
    assert_eq!(snapshot.owner_user_id, 200);
    assert_eq!(snapshot.kind, SnapshotKind::Roles);
    assert_eq!(snapshot.description.as_deref(), Some("before event"));
    assert_eq!(snapshot.payload.roles().len(), 2);

    Ok(())
}

/// Tests that the recorded size is the byte length of the serialized payload.
///
/// Expected: size_bytes equals the encoded payload length
#[tokio::test]
async fn records_payload_size() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let param = create_param(100, 200);
    let expected = param.payload.encode()?.len() as u64;

    let snapshot = SnapshotRepository::new(db).create(param).await?;

    assert_eq!(snapshot.size_bytes, expected);
    assert!(snapshot.size_bytes > 0);

    Ok(())
}

/// Tests the per-owner quota.
///
/// Verifies that an owner holding 10 snapshots in a guild cannot create an 11th and
/// that the failed attempt leaves the count unchanged.
///
/// Expected: Err(QuotaExceeded), count stays 10
#[tokio::test]
async fn rejects_create_over_quota() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::helpers::create_snapshots_for_owner(db, "100", "200", 10).await?;

    let repo = SnapshotRepository::new(db);
    let result = repo.create(create_param(100, 200)).await;

    assert!(matches!(
        result,
        Err(AppError::BackupErr(BackupError::QuotaExceeded { limit: 10 }))
    ));
    assert_eq!(repo.count_for_owner(100, 200).await?, 10);

    Ok(())
}

/// Tests that the quota is scoped per owner and per guild.
///
/// Verifies that another user in the same guild, and the same user in another guild,
/// can still create snapshots when one owner is at the limit.
///
/// Expected: Ok for both
#[tokio::test]
async fn quota_is_scoped_to_owner_and_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::helpers::create_snapshots_for_owner(db, "100", "200", 10).await?;

    let repo = SnapshotRepository::new(db);
    assert!(repo.create(create_param(100, 201)).await.is_ok());
    assert!(repo.create(create_param(101, 200)).await.is_ok());

    let total = entity::prelude::GuildSnapshot::find().count(db).await?;
    assert_eq!(total, 12);

    Ok(())
}
