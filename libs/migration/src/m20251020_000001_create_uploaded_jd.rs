use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251020_000000_create_mem_registry::MemRegistry;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UploadedJd::Table)
                    .if_not_exists()
                    .col(pk_uuid(UploadedJd::JdId))
                    .col(string(UploadedJd::MemoryId))
                    .col(string(UploadedJd::Company))
                    .col(string(UploadedJd::Position))
                    .col(text(UploadedJd::Content))
                    .col(
                        timestamp_with_time_zone(UploadedJd::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_uploaded_jd_memory")
                            .from(UploadedJd::Table, UploadedJd::MemoryId)
                            .to(MemRegistry::Table, MemRegistry::MemoryId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_uploaded_jd_memory")
                    .table(UploadedJd::Table)
                    .col(UploadedJd::MemoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UploadedJd::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UploadedJd {
    Table,
    JdId,
    MemoryId,
    Company,
    Position,
    Content,
    CreatedAt,
}
