use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::opportunity_tag::Entity")]
    OpportunityTag,
}

impl Related<super::opportunity_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpportunityTag.def()
    }
}

impl Related<super::funding_opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        super::opportunity_tag::Relation::FundingOpportunity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::opportunity_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
