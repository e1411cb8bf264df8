use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_reference_tables::{Organizations, ResearchAreas, Tags};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FundingOpportunities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FundingOpportunities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FundingOpportunities::Title).string_len(500).not_null())
                    .col(ColumnDef::new(FundingOpportunities::OrganizationId).integer().not_null())
                    .col(ColumnDef::new(FundingOpportunities::Country).string_len(100))
                    .col(ColumnDef::new(FundingOpportunities::AmountMin).big_integer())
                    .col(ColumnDef::new(FundingOpportunities::AmountMax).big_integer())
                    .col(
                        ColumnDef::new(FundingOpportunities::Currency)
                            .string_len(10)
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(FundingOpportunities::Deadline).date())
                    .col(ColumnDef::new(FundingOpportunities::ResearchAreaId).integer())
                    .col(ColumnDef::new(FundingOpportunities::Description).text())
                    .col(ColumnDef::new(FundingOpportunities::EligibilityCriteria).text())
                    .col(ColumnDef::new(FundingOpportunities::ApplicationUrl).string_len(500))
                    .col(
                        ColumnDef::new(FundingOpportunities::Status)
                            .string_len(50)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(FundingOpportunities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FundingOpportunities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_opportunities_organization")
                            .from(FundingOpportunities::Table, FundingOpportunities::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_opportunities_research_area")
                            .from(FundingOpportunities::Table, FundingOpportunities::ResearchAreaId)
                            .to(ResearchAreas::Table, ResearchAreas::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing always filters on status and orders by deadline.
        manager
            .create_index(
                Index::create()
                    .name("idx_funding_opportunities_status_deadline")
                    .table(FundingOpportunities::Table)
                    .col(FundingOpportunities::Status)
                    .col(FundingOpportunities::Deadline)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OpportunityTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OpportunityTags::OpportunityId).integer().not_null())
                    .col(ColumnDef::new(OpportunityTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(OpportunityTags::OpportunityId)
                            .col(OpportunityTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunity_tags_opportunity")
                            .from(OpportunityTags::Table, OpportunityTags::OpportunityId)
                            .to(FundingOpportunities::Table, FundingOpportunities::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunity_tags_tag")
                            .from(OpportunityTags::Table, OpportunityTags::TagId)
                            .to(Tags::Table, Tags::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OpportunityTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FundingOpportunities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FundingOpportunities {
    Table,
    Id,
    Title,
    OrganizationId,
    Country,
    AmountMin,
    AmountMax,
    Currency,
    Deadline,
    ResearchAreaId,
    Description,
    EligibilityCriteria,
    ApplicationUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OpportunityTags {
    Table,
    OpportunityId,
    TagId,
}
