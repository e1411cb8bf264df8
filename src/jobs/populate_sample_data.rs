//! One-shot loader for the demo catalog.
//!
//! Reference rows (organizations, research areas, tags) are looked up by name
//! and created when missing; opportunities are skipped when one with the same
//! title already exists. Titles come from a fixed-seed generator, so running
//! the job again inserts nothing new. Not safe to run concurrently with
//! itself: two runs can race on the lookup-or-create.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::entities::{funding_opportunity, opportunity_tag, organization, research_area, tag};
use crate::error::AppError;
use crate::sample_data::{
    generate_sample_opportunities, DEMO_COUNTRIES, DEMO_ORGANIZATIONS, DEMO_RESEARCH_AREAS,
    DEMO_TAGS, SAMPLE_BATCH_SIZE, SAMPLE_ELIGIBILITY,
};

/// Seed for the populated batch. Fixing it keeps titles, and so the
/// title-based dedup, stable across runs.
pub const POPULATE_SEED: u64 = 0x5EED_0052;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulateSummary {
    pub organizations_created: usize,
    pub research_areas_created: usize,
    pub tags_created: usize,
    pub opportunities_created: usize,
    pub opportunities_skipped: usize,
}

async fn ensure_organization<C, R>(db: &C, name: &str, rng: &mut R) -> Result<(i32, bool), AppError>
where
    C: ConnectionTrait,
    R: rand::Rng,
{
    if let Some(existing) = organization::Entity::find()
        .filter(organization::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok((existing.id, false));
    }

    let country = DEMO_COUNTRIES.choose(rng).map(|c| c.to_string());
    let created = organization::ActiveModel {
        name: Set(name.to_string()),
        country: Set(country),
        ..organization::ActiveModel::new()
    }
    .insert(db)
    .await?;
    Ok((created.id, true))
}

async fn ensure_research_area<C: ConnectionTrait>(db: &C, name: &str) -> Result<(i32, bool), AppError> {
    if let Some(existing) = research_area::Entity::find()
        .filter(research_area::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok((existing.id, false));
    }

    let created = research_area::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((created.id, true))
}

async fn ensure_tag<C: ConnectionTrait>(db: &C, name: &str) -> Result<(i32, bool), AppError> {
    if let Some(existing) = tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok((existing.id, false));
    }

    let created = tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((created.id, true))
}

fn lookup(ids: &HashMap<&'static str, i32>, kind: &str, name: &str) -> Result<i32, AppError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| AppError::InternalError(format!("{kind} '{name}' missing after population")))
}

/// Ensures the demo reference data exists, then inserts the 52 sample
/// opportunities that are not already present.
#[tracing::instrument(skip(db))]
pub async fn run_populate_sample_data(db: &DatabaseConnection) -> Result<PopulateSummary, AppError> {
    info!("Populating sample data");
    let mut summary = PopulateSummary::default();
    let mut reference_rng = StdRng::from_rng(&mut rand::rng());

    let mut organizations = HashMap::new();
    for name in DEMO_ORGANIZATIONS {
        let (id, created) = ensure_organization(db, name, &mut reference_rng).await?;
        summary.organizations_created += usize::from(created);
        organizations.insert(name, id);
    }

    let mut research_areas = HashMap::new();
    for name in DEMO_RESEARCH_AREAS {
        let (id, created) = ensure_research_area(db, name).await?;
        summary.research_areas_created += usize::from(created);
        research_areas.insert(name, id);
    }

    let mut tags = HashMap::new();
    for name in DEMO_TAGS {
        let (id, created) = ensure_tag(db, name).await?;
        summary.tags_created += usize::from(created);
        tags.insert(name, id);
    }

    let mut rng = StdRng::seed_from_u64(POPULATE_SEED);
    let batch = generate_sample_opportunities(SAMPLE_BATCH_SIZE, &mut rng);

    let txn = db.begin().await?;
    for sample in batch {
        let existing = funding_opportunity::Entity::find()
            .filter(funding_opportunity::Column::Title.eq(sample.title.as_str()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            debug!(title = %sample.title, "opportunity already present, skipping");
            summary.opportunities_skipped += 1;
            continue;
        }

        let inserted = funding_opportunity::ActiveModel {
            title: Set(sample.title.clone()),
            organization_id: Set(lookup(&organizations, "organization", sample.organization)?),
            country: Set(Some(sample.country.to_string())),
            amount_min: Set(sample.amount_min),
            amount_max: Set(Some(sample.amount_max)),
            deadline: Set(Some(sample.deadline)),
            research_area_id: Set(Some(lookup(&research_areas, "research area", sample.research_area)?)),
            description: Set(Some(sample.description.clone())),
            eligibility_criteria: Set(Some(SAMPLE_ELIGIBILITY.to_string())),
            application_url: Set(Some(sample.application_url.clone())),
            ..funding_opportunity::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        let mut links = Vec::with_capacity(sample.tags.len());
        for name in &sample.tags {
            links.push(opportunity_tag::ActiveModel {
                opportunity_id: Set(inserted.id),
                tag_id: Set(lookup(&tags, "tag", name)?),
            });
        }
        if !links.is_empty() {
            opportunity_tag::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }
        summary.opportunities_created += 1;
    }
    txn.commit().await?;

    info!(
        organizations_created = summary.organizations_created,
        research_areas_created = summary.research_areas_created,
        tags_created = summary.tags_created,
        opportunities_created = summary.opportunities_created,
        opportunities_skipped = summary.opportunities_skipped,
        "Sample data populated"
    );
    Ok(summary)
}
