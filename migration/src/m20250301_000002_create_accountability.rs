use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accountability::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accountability::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accountability::UserId).integer().not_null())
                    .col(ColumnDef::new(Accountability::Content).text().not_null())
                    .col(ColumnDef::new(Accountability::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accountability_user_id")
                            .from(Accountability::Table, Accountability::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accountability_user_id")
                    .table(Accountability::Table)
                    .col(Accountability::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accountability::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accountability {
    Table,
    Id,
    UserId,
    Content,
    CreatedAt,
}
