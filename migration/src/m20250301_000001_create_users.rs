use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::ContactNumber).string().not_null())
                    .col(ColumnDef::new(Users::LiveMode).string_len(16).not_null().default("audio"))
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null().default("MEMBER"))
                    .col(ColumnDef::new(Users::WatchLiveEnabled).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::SubmitFeedbackEnabled).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Users::SubmitAccountabilityEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::InchargeId).integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    // Removing a supervisor leaves their members unassigned
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_incharge_id")
                            .from(Users::Table, Users::InchargeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_incharge_id")
                    .table(Users::Table)
                    .col(Users::InchargeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    ContactNumber,
    LiveMode,
    Role,
    WatchLiveEnabled,
    SubmitFeedbackEnabled,
    SubmitAccountabilityEnabled,
    InchargeId,
    CreatedAt,
    UpdatedAt,
}
