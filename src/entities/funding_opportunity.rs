use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of an opportunity. Stored as its lowercase name.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "closed")]
    Closed,
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "funding_opportunities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub organization_id: i32,
    pub country: Option<String>,
    pub amount_min: Option<i64>,
    pub amount_max: Option<i64>,
    pub currency: String,
    pub deadline: Option<Date>,
    pub research_area_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub eligibility_criteria: Option<String>,
    pub application_url: Option<String>,
    pub status: OpportunityStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id"
    )]
    Organization,
    #[sea_orm(
        belongs_to = "super::research_area::Entity",
        from = "Column::ResearchAreaId",
        to = "super::research_area::Column::Id"
    )]
    ResearchArea,
    #[sea_orm(has_many = "super::opportunity_tag::Entity")]
    OpportunityTag,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::research_area::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResearchArea.def()
    }
}

impl Related<super::opportunity_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpportunityTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::opportunity_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::opportunity_tag::Relation::FundingOpportunity.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            currency: Set("USD".to_string()),
            status: Set(OpportunityStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // Inserts keep the timestamps chosen by the caller; every update refreshes updated_at.
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}
