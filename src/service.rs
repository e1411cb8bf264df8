//! Read side of the catalog: listings, statistics and filter options.

use std::collections::HashMap;

use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::entities::{
    funding_opportunity, opportunity_tag, organization, research_area, tag, OpportunityStatus,
};
use crate::error::AppError;
use crate::jobs::{run_populate_sample_data, PopulateSummary};
use crate::query::{build_opportunity_query, page_count, OpportunityFilter};
use crate::records::{FilterOptions, OpportunityPage, OpportunityRecord, Statistics};
use crate::sample_data::{sample_filter_options, sample_records, DEMO_STATISTICS, SAMPLE_BATCH_SIZE};

/// Catalog operations over a database handle. Cheap to clone; the
/// connection is a pool.
#[derive(Clone, Debug)]
pub struct CatalogService {
    db: DatabaseConnection,
    demo_fallback: bool,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            demo_fallback: true,
        }
    }

    pub fn with_demo_fallback(mut self, enabled: bool) -> Self {
        self.demo_fallback = enabled;
        self
    }

    /// One page of active opportunities matching `filter`.
    ///
    /// When nothing matches at all (and the demo fallback is on) the filters
    /// are ignored and a generated batch of sample opportunities is returned
    /// instead, flagged with `is_sample_data`.
    #[tracing::instrument(skip(self), fields(page = filter.page, per_page = filter.per_page))]
    pub async fn list_opportunities(&self, filter: &OpportunityFilter) -> Result<OpportunityPage, AppError> {
        let paginator = build_opportunity_query(filter).paginate(&self.db, filter.per_page);
        let total = paginator.num_items().await?;

        if total == 0 && self.demo_fallback {
            tracing::info!("no opportunities matched; serving sample data");
            return Ok(OpportunityPage {
                opportunities: sample_records(SAMPLE_BATCH_SIZE),
                total: SAMPLE_BATCH_SIZE as u64,
                pages: page_count(SAMPLE_BATCH_SIZE as u64, filter.per_page),
                current_page: filter.page,
                is_sample_data: Some(true),
            });
        }

        let offset = (filter.page - 1).checked_mul(filter.per_page);
        let opportunities = match offset {
            Some(offset) if offset < total => {
                let models = paginator.fetch_page(filter.page - 1).await?;
                tracing::debug!(total, returned = models.len(), "fetched opportunity page");
                self.to_records(models).await?
            }
            _ => {
                tracing::debug!(total, page = filter.page, "page is past the last result");
                Vec::new()
            }
        };

        Ok(OpportunityPage {
            opportunities,
            total,
            pages: page_count(total, filter.per_page),
            current_page: filter.page,
            is_sample_data: None,
        })
    }

    /// Resolves organization, research area and tag names for a batch of rows.
    async fn to_records(&self, models: Vec<funding_opportunity::Model>) -> Result<Vec<OpportunityRecord>, AppError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let organization_ids: Vec<i32> = models.iter().map(|m| m.organization_id).collect();
        let research_area_ids: Vec<i32> = models.iter().filter_map(|m| m.research_area_id).collect();
        let opportunity_ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let organizations: HashMap<i32, String> = organization::Entity::find()
            .filter(organization::Column::Id.is_in(organization_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|o| (o.id, o.name))
            .collect();

        let research_areas: HashMap<i32, String> = if research_area_ids.is_empty() {
            HashMap::new()
        } else {
            research_area::Entity::find()
                .filter(research_area::Column::Id.is_in(research_area_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|r| (r.id, r.name))
                .collect()
        };

        let mut tags: HashMap<i32, Vec<String>> = HashMap::new();
        let links = opportunity_tag::Entity::find()
            .filter(opportunity_tag::Column::OpportunityId.is_in(opportunity_ids))
            .find_also_related(tag::Entity)
            .all(&self.db)
            .await?;
        for (link, tag) in links {
            if let Some(tag) = tag {
                tags.entry(link.opportunity_id).or_default().push(tag.name);
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let organization = organizations.get(&model.organization_id).cloned();
                let research_area = model
                    .research_area_id
                    .and_then(|id| research_areas.get(&id).cloned());
                let tags = tags.remove(&model.id).unwrap_or_default();
                OpportunityRecord::from_model(model, organization, research_area, tags)
            })
            .collect())
    }

    /// Headline counters. Organizations are counted regardless of whether
    /// they have anything active.
    #[tracing::instrument(skip(self))]
    pub async fn statistics(&self) -> Result<Statistics, AppError> {
        let active = || {
            funding_opportunity::Entity::find()
                .filter(funding_opportunity::Column::Status.eq(OpportunityStatus::Active))
        };

        let active_opportunities = active().count(&self.db).await?;

        if active_opportunities == 0 && self.demo_fallback {
            tracing::info!("no active opportunities; serving demo statistics");
            return Ok(DEMO_STATISTICS);
        }

        // SUM over a bigint column is numeric on Postgres; cast back so both backends decode to i64.
        let total_funding: Option<i64> = active()
            .select_only()
            .column_as(
                SimpleExpr::from(Func::cast_as(
                    Func::sum(Expr::col(funding_opportunity::Column::AmountMax.as_column_ref())),
                    Alias::new("BIGINT"),
                )),
                "total_funding",
            )
            .into_tuple::<Option<i64>>()
            .one(&self.db)
            .await?
            .flatten();

        // A NULL country counts as one distinct value.
        let countries = active()
            .select_only()
            .column(funding_opportunity::Column::Country)
            .distinct()
            .count(&self.db)
            .await?;

        let funding_sources = organization::Entity::find().count(&self.db).await?;

        Ok(Statistics {
            active_opportunities,
            total_funding: total_funding.unwrap_or(0),
            countries,
            funding_sources,
        })
    }

    /// Distinct values for each filter control.
    #[tracing::instrument(skip(self))]
    pub async fn filter_options(&self) -> Result<FilterOptions, AppError> {
        let countries: Vec<Option<String>> = funding_opportunity::Entity::find()
            .select_only()
            .column(funding_opportunity::Column::Country)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        let organizations: Vec<String> = organization::Entity::find()
            .select_only()
            .column(organization::Column::Name)
            .into_tuple()
            .all(&self.db)
            .await?;

        let research_areas: Vec<String> = research_area::Entity::find()
            .select_only()
            .column(research_area::Column::Name)
            .into_tuple()
            .all(&self.db)
            .await?;

        let tags: Vec<String> = tag::Entity::find()
            .select_only()
            .column(tag::Column::Name)
            .into_tuple()
            .all(&self.db)
            .await?;

        let options = FilterOptions {
            countries: distinct_sorted(countries.into_iter().flatten()),
            organizations: distinct_sorted(organizations),
            research_areas: distinct_sorted(research_areas),
            tags: distinct_sorted(tags),
        };

        if self.demo_fallback
            && options.countries.is_empty()
            && options.organizations.is_empty()
            && options.research_areas.is_empty()
        {
            tracing::info!("catalog has no reference data; serving sample filter options");
            return Ok(sample_filter_options());
        }

        Ok(options)
    }

    /// Loads the demo catalog. See [`run_populate_sample_data`].
    pub async fn populate_sample_data(&self) -> Result<PopulateSummary, AppError> {
        run_populate_sample_data(&self.db).await
    }
}

/// Sorted, deduplicated, without empty strings.
pub fn distinct_sorted<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
    values.sort();
    values.dedup();
    values
}
