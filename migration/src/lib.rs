pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_guild_snapshot_table;
mod m20260301_000002_create_backup_schedule_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_guild_snapshot_table::Migration),
            Box::new(m20260301_000002_create_backup_schedule_table::Migration),
        ]
    }
}
