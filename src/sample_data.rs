//! Demo catalog used before real data has been loaded.
//!
//! The fixed lists below double as the reference data written by the
//! population job, so generated opportunities always point at rows that exist.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::entities::OpportunityStatus;
use crate::records::{format_date, format_timestamp, FilterOptions, OpportunityRecord, Statistics};

/// Size of the generated listing and of the populated demo catalog.
pub const SAMPLE_BATCH_SIZE: usize = 52;

pub const DEMO_COUNTRIES: [&str; 8] = [
    "United States",
    "United Kingdom",
    "Canada",
    "Germany",
    "Australia",
    "European Union",
    "Global",
    "France",
];

pub const DEMO_ORGANIZATIONS: [&str; 8] = [
    "National Institutes of Health",
    "Wellcome Trust",
    "National Science Foundation",
    "European Research Council",
    "Gates Foundation",
    "Alfred P. Sloan Foundation",
    "Simons Foundation",
    "Chan Zuckerberg Initiative",
];

pub const DEMO_RESEARCH_AREAS: [&str; 8] = [
    "Biomedical Sciences",
    "Life Sciences",
    "STEM",
    "All Fields",
    "Global Health",
    "Computer Science",
    "Physics",
    "Environmental Science",
];

pub const DEMO_TAGS: [&str; 5] = [
    "Early Career",
    "Fellowship",
    "Research Grant",
    "Travel Grant",
    "Seed Funding",
];

/// Possible values of `amount_max` for a generated opportunity.
pub const SAMPLE_AMOUNTS: [i64; 7] = [50_000, 100_000, 250_000, 500_000, 1_000_000, 1_500_000, 2_000_000];

pub const SAMPLE_ELIGIBILITY: &str = "Must be an eligible researcher or institution.";

/// Reported by the statistics endpoint while nothing is active.
pub const DEMO_STATISTICS: Statistics = Statistics {
    active_opportunities: 52,
    total_funding: 65_100_000,
    countries: 8,
    funding_sources: 10,
};

pub fn sample_filter_options() -> FilterOptions {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    FilterOptions {
        countries: owned(&DEMO_COUNTRIES),
        organizations: owned(&DEMO_ORGANIZATIONS),
        research_areas: owned(&DEMO_RESEARCH_AREAS),
        tags: owned(&DEMO_TAGS),
    }
}

/// A generated opportunity, still referring to its organization, research
/// area and tags by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOpportunity {
    /// One-based position in the batch; doubles as the record id.
    pub index: usize,
    pub title: String,
    pub organization: &'static str,
    pub research_area: &'static str,
    pub country: &'static str,
    pub amount_min: Option<i64>,
    pub amount_max: i64,
    pub deadline: NaiveDate,
    pub description: String,
    pub application_url: String,
    pub tags: Vec<&'static str>,
    pub generated_at: DateTime<Utc>,
}

impl SampleOpportunity {
    pub fn to_record(&self) -> OpportunityRecord {
        let mut tags: Vec<String> = self.tags.iter().map(|t| t.to_string()).collect();
        tags.sort();
        OpportunityRecord {
            id: self.index as i32,
            title: self.title.clone(),
            organization: Some(self.organization.to_string()),
            country: Some(self.country.to_string()),
            amount_min: self.amount_min,
            amount_max: Some(self.amount_max),
            currency: "USD".to_string(),
            deadline: Some(format_date(self.deadline)),
            research_area: Some(self.research_area.to_string()),
            description: Some(self.description.clone()),
            eligibility_criteria: Some(SAMPLE_ELIGIBILITY.to_string()),
            application_url: Some(self.application_url.clone()),
            status: OpportunityStatus::Active,
            tags,
            created_at: format_timestamp(self.generated_at),
            updated_at: format_timestamp(self.generated_at),
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.random_range(0..items.len())]
}

/// Generates `count` active opportunities with randomized content.
pub fn generate_sample_opportunities<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<SampleOpportunity> {
    let now = Utc::now();
    (1..=count)
        .map(|i| {
            let organization = pick(rng, &DEMO_ORGANIZATIONS);
            let research_area = pick(rng, &DEMO_RESEARCH_AREAS);
            let country = pick(rng, &DEMO_COUNTRIES);
            let deadline = (now + Duration::days(rng.random_range(30..=365))).date_naive();
            let amount_max = SAMPLE_AMOUNTS[rng.random_range(0..SAMPLE_AMOUNTS.len())];
            let amount_min = rng.random_bool(0.5).then(|| amount_max * 4 / 5);
            let tag_count = rng.random_range(1..=3);
            let tags = DEMO_TAGS.choose_multiple(rng, tag_count).copied().collect();

            SampleOpportunity {
                index: i,
                title: format!("Sample Grant {} for {}", i, research_area),
                organization,
                research_area,
                country,
                amount_min,
                amount_max,
                deadline,
                description: format!(
                    "This is a sample description for grant {} focusing on {} by {}.",
                    i, research_area, organization
                ),
                application_url: format!("https://example.com/grant/{}", i),
                tags,
                generated_at: now,
            }
        })
        .collect()
}

/// A fresh batch of sample records drawn from the thread-local generator.
pub fn sample_records(count: usize) -> Vec<OpportunityRecord> {
    generate_sample_opportunities(count, &mut rand::rng())
        .iter()
        .map(SampleOpportunity::to_record)
        .collect()
}
