//! External JSON shapes returned by the API.
//!
//! [`OpportunityRecord`] is the only place field names and null handling for
//! opportunities are decided; persisted rows and generated sample rows both
//! end up here.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{funding_opportunity, OpportunityStatus};

/// A funding opportunity as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OpportunityRecord {
    pub id: i32,
    pub title: String,
    /// Name of the publishing organization
    pub organization: Option<String>,
    pub country: Option<String>,
    pub amount_min: Option<i64>,
    pub amount_max: Option<i64>,
    pub currency: String,
    /// Application deadline as `YYYY-MM-DD`
    pub deadline: Option<String>,
    /// Name of the research area
    pub research_area: Option<String>,
    pub description: Option<String>,
    pub eligibility_criteria: Option<String>,
    pub application_url: Option<String>,
    pub status: OpportunityStatus,
    /// Tag names, sorted
    pub tags: Vec<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl OpportunityRecord {
    /// Builds the record for a stored opportunity from its already-loaded references.
    pub fn from_model(
        model: funding_opportunity::Model,
        organization: Option<String>,
        research_area: Option<String>,
        mut tags: Vec<String>,
    ) -> Self {
        tags.sort();
        Self {
            id: model.id,
            title: model.title,
            organization,
            country: model.country,
            amount_min: model.amount_min,
            amount_max: model.amount_max,
            currency: model.currency,
            deadline: model.deadline.map(format_date),
            research_area,
            description: model.description,
            eligibility_criteria: model.eligibility_criteria,
            application_url: model.application_url,
            status: model.status,
            tags,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// One page of opportunities
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpportunityPage {
    pub opportunities: Vec<OpportunityRecord>,
    /// Number of opportunities matching the filters
    pub total: u64,
    /// Number of pages at the requested page size
    pub pages: u64,
    pub current_page: u64,
    /// Present (and true) only when the listing was replaced by generated sample data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sample_data: Option<bool>,
}

/// Headline counters over active opportunities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    pub active_opportunities: u64,
    /// Sum of `amount_max` over active opportunities
    pub total_funding: i64,
    /// Distinct countries among active opportunities
    pub countries: u64,
    /// Organizations in the catalog
    pub funding_sources: u64,
}

/// Values a client can offer in its filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub organizations: Vec<String>,
    pub research_areas: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
