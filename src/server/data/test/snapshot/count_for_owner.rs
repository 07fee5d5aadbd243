use super::*;

/// Tests counting snapshots per owner and guild.
///
/// Expected: only the owner's snapshots in the guild are counted
#[tokio::test]
async fn counts_owner_snapshots_in_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_snapshot_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::helpers::create_snapshots_for_owner(db, "100", "200", 3).await?;
    factory::create_snapshot(db, "100", "201").await?;
    factory::create_snapshot(db, "101", "200").await?;

    let count = SnapshotRepository::new(db).count_for_owner(100, 200).await?;

    assert_eq!(count, 3);

    Ok(())
}
