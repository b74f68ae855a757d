use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CallbackRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CallbackRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CallbackRequests::Name)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CallbackRequests::Company)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CallbackRequests::Phone)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CallbackRequests::Email)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CallbackRequests::Message).text().null())
                    .col(
                        ColumnDef::new(CallbackRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CallbackRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CallbackRequests {
    Table,
    Id,
    Name,
    Company,
    Phone,
    Email,
    Message,
    CreatedAt,
}
