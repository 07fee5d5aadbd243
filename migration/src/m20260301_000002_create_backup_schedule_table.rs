use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BackupSchedule::Table)
                    .if_not_exists()
                    .col(pk_auto(BackupSchedule::Id))
                    .col(string_uniq(BackupSchedule::GuildId))
                    .col(string(BackupSchedule::OwnerUserId))
                    .col(string(BackupSchedule::Frequency))
                    .col(timestamp_with_time_zone_null(BackupSchedule::LastRunAt))
                    .col(timestamp_with_time_zone(BackupSchedule::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BackupSchedule::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BackupSchedule {
    Table,
    Id,
    GuildId,
    OwnerUserId,
    Frequency,
    LastRunAt,
    CreatedAt,
}
