use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(
                        ColumnDef::new(Projects::ProjectType)
                            .string_len(50)
                            .not_null()
                            .default("commercial"),
                    )
                    .col(ColumnDef::new(Projects::Budget).double().not_null())
                    .col(ColumnDef::new(Projects::Funding).double().not_null())
                    .col(ColumnDef::new(Projects::Duration).integer().null())
                    .col(ColumnDef::new(Projects::Irr).double().not_null())
                    .col(ColumnDef::new(Projects::Location).string_len(100).not_null())
                    .col(ColumnDef::new(Projects::LocationType).string_len(50).null())
                    .col(
                        ColumnDef::new(Projects::RiskLevel)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Projects::Secured)
                            .string_len(50)
                            .not_null()
                            .default("mezz"),
                    )
                    .col(ColumnDef::new(Projects::SponsorEquity).double().not_null())
                    .col(ColumnDef::new(Projects::MoicEm).double().null())
                    .col(ColumnDef::new(Projects::Timeline).string_len(200).null())
                    .col(ColumnDef::new(Projects::ExitStrategy).string_len(200).null())
                    .col(
                        ColumnDef::new(Projects::DeveloperTrackRecord)
                            .string_len(200)
                            .null(),
                    )
                    .col(ColumnDef::new(Projects::Website).string_len(200).null())
                    .col(
                        ColumnDef::new(Projects::PreapprovedFacility)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Projects::BrandPartnership)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Projects::AttachmentPath)
                            .string_len(300)
                            .null(),
                    )
                    .col(ColumnDef::new(Projects::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_user_id")
                            .from(Projects::Table, Projects::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on location for the search page's set-membership filter
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_location")
                    .table(Projects::Table)
                    .col(Projects::Location)
                    .to_owned(),
            )
            .await?;

        // Index on owner for the "my projects" listing
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_user_id")
                    .table(Projects::Table)
                    .col(Projects::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    ProjectType,
    Budget,
    Funding,
    Duration,
    Irr,
    Location,
    LocationType,
    RiskLevel,
    Secured,
    SponsorEquity,
    MoicEm,
    Timeline,
    ExitStrategy,
    DeveloperTrackRecord,
    Website,
    PreapprovedFacility,
    BrandPartnership,
    AttachmentPath,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
