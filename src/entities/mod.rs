pub mod funding_opportunity;
pub mod opportunity_tag;
pub mod organization;
pub mod research_area;
pub mod tag;

pub use funding_opportunity::OpportunityStatus;

pub use funding_opportunity::Entity as FundingOpportunity;
pub use opportunity_tag::Entity as OpportunityTag;
pub use organization::Entity as Organization;
pub use research_area::Entity as ResearchArea;
pub use tag::Entity as Tag;
