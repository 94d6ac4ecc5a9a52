use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemRegistry::Table)
                    .if_not_exists()
                    .col(string(MemRegistry::MemoryId).primary_key())
                    // Mode the memory was created under: interviewer / default / ...
                    .col(string(MemRegistry::App))
                    .col(string_null(MemRegistry::Name))
                    .col(string_null(MemRegistry::Owner))
                    .col(json(MemRegistry::ParamsJson).default("{}"))
                    .col(string(MemRegistry::Status).default("active"))
                    .col(
                        timestamp_with_time_zone(MemRegistry::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MemRegistry::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mem_registry_app_created")
                    .table(MemRegistry::Table)
                    .col(MemRegistry::App)
                    .col(MemRegistry::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemRegistry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MemRegistry {
    Table,
    MemoryId,
    App,
    Name,
    Owner,
    ParamsJson,
    Status,
    CreatedAt,
    UpdatedAt,
}
