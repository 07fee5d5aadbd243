use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildSnapshot::Table)
                    .if_not_exists()
                    .col(string(GuildSnapshot::Id).primary_key())
                    .col(string(GuildSnapshot::GuildId))
                    .col(string(GuildSnapshot::GuildName))
                    .col(string(GuildSnapshot::OwnerUserId))
                    .col(string(GuildSnapshot::Kind))
                    .col(string_null(GuildSnapshot::Description))
                    .col(text(GuildSnapshot::Payload))
                    .col(big_integer(GuildSnapshot::SizeBytes))
                    .col(timestamp_with_time_zone(GuildSnapshot::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Quota checks and ownership-scoped lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_guild_snapshot_guild_owner")
                    .table(GuildSnapshot::Table)
                    .col(GuildSnapshot::GuildId)
                    .col(GuildSnapshot::OwnerUserId)
                    .to_owned(),
            )
            .await?;

        // Newest-first listing
        manager
            .create_index(
                Index::create()
                    .name("idx_guild_snapshot_guild_created_at")
                    .table(GuildSnapshot::Table)
                    .col(GuildSnapshot::GuildId)
                    .col(GuildSnapshot::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_guild_snapshot_guild_created_at")
                    .table(GuildSnapshot::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_guild_snapshot_guild_owner")
                    .table(GuildSnapshot::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GuildSnapshot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildSnapshot {
    Table,
    Id,
    GuildId,
    GuildName,
    OwnerUserId,
    Kind,
    Description,
    Payload,
    SizeBytes,
    CreatedAt,
}
