use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // project_id is a weak reference: stored as a plain integer with no
        // foreign key, so a request outlives the project it pointed at.
        manager
            .create_table(
                Table::create()
                    .table(NdaRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NdaRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NdaRequests::UserId).integer().not_null())
                    .col(ColumnDef::new(NdaRequests::ProjectId).integer().null())
                    .col(
                        ColumnDef::new(NdaRequests::Company)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NdaRequests::ContactName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NdaRequests::ContactEmail)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(NdaRequests::Message).text().null())
                    .col(
                        ColumnDef::new(NdaRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nda_requests_user_id")
                            .from(NdaRequests::Table, NdaRequests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_nda_requests_user_id")
                    .table(NdaRequests::Table)
                    .col(NdaRequests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NdaRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NdaRequests {
    Table,
    Id,
    UserId,
    ProjectId,
    Company,
    ContactName,
    ContactEmail,
    Message,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
