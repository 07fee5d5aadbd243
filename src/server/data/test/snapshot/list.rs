use super::*;

/// Tests that snapshots are listed newest first.
///
/// Expected: Ok with snapshots ordered by created_at descending
#[tokio::test]
async fn lists_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let oldest = factory::snapshot::SnapshotFactory::new(db)
        .guild_id("100")
        .owner_user_id("200")
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    let newest = factory::snapshot::SnapshotFactory::new(db)
        .guild_id("100")
        .owner_user_id("200")
        .created_at(now)
        .build()
        .await?;
    let middle = factory::snapshot::SnapshotFactory::new(db)
        .guild_id("100")
        .owner_user_id("200")
        .created_at(now - Duration::hours(1))
        .build()
        .await?;

    let snapshots = SnapshotRepository::new(db).list(100, 200).await?;

    let ids: Vec<&str> = snapshots.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![newest.id.as_str(), middle.id.as_str(), oldest.id.as_str()]);

    Ok(())
}

/// Tests that listing only returns the caller's snapshots in the requested guild.
///
/// Expected: Ok with one snapshot
#[tokio::test]
async fn lists_only_owned_snapshots() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mine = factory::create_snapshot(db, "100", "200").await?;
    factory::create_snapshot(db, "100", "201").await?;
    factory::create_snapshot(db, "101", "200").await?;

    let snapshots = SnapshotRepository::new(db).list(100, 200).await?;

    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].id, mine.id);

    Ok(())
}

/// Tests listing with no snapshots.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn lists_nothing_for_new_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let snapshots = SnapshotRepository::new(db).list(100, 200).await?;

    assert!(snapshots.is_empty());

    Ok(())
}
