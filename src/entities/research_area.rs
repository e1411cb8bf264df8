use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "research_areas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::funding_opportunity::Entity")]
    FundingOpportunity,
}

impl Related<super::funding_opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundingOpportunity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
