//! Filter parsing and query builder for opportunity listings.
//!
//! Request parameters arrive as loose strings ([`OpportunityQuery`]), get
//! coerced into an [`OpportunityFilter`], and [`build_opportunity_query`]
//! turns that into a single sea-orm `Select` with every predicate, join and
//! ordering applied. Nothing here touches a connection.

use sea_orm::sea_query::{Expr, Func, NullOrdering, Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, Order, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};
use utoipa::IntoParams;

use crate::entities::{
    funding_opportunity, opportunity_tag, organization, research_area, tag, OpportunityStatus,
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 20;
/// Upper bound for `page` and `per_page`; larger values are clamped so that
/// LIMIT and OFFSET stay within a signed 64-bit bind parameter.
pub const MAX_PAGING_VALUE: u64 = i64::MAX as u64;

/// Query string accepted by the opportunity listing.
///
/// Every field is kept as raw text so that malformed values degrade to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OpportunityQuery {
    /// Page number, starting at 1 (default: 1)
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    /// Items per page (default: 20)
    #[param(value_type = Option<u64>)]
    pub per_page: Option<String>,
    /// Case-insensitive match against title, description or organization name
    pub keyword: Option<String>,
    /// Case-insensitive substring of the opportunity country
    pub country: Option<String>,
    /// Case-insensitive substring of the organization name
    pub organization: Option<String>,
    /// Case-insensitive substring of the research area name
    pub research_area: Option<String>,
    /// Keep opportunities whose maximum amount is at least this value
    #[param(value_type = Option<i64>)]
    pub min_amount: Option<String>,
    /// Keep opportunities whose minimum amount is at most this value
    #[param(value_type = Option<i64>)]
    pub max_amount: Option<String>,
    /// Comma-separated tag names; any one of them is enough to match
    pub tags: Option<String>,
}

impl OpportunityQuery {
    /// Collects decoded query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut query.page,
                "per_page" => &mut query.per_page,
                "keyword" => &mut query.keyword,
                "country" => &mut query.country,
                "organization" => &mut query.organization,
                "research_area" => &mut query.research_area,
                "min_amount" => &mut query.min_amount,
                "max_amount" => &mut query.max_amount,
                "tags" => &mut query.tags,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityFilter {
    pub page: u64,
    pub per_page: u64,
    pub keyword: Option<String>,
    pub country: Option<String>,
    pub organization: Option<String>,
    pub research_area: Option<String>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub tags: Vec<String>,
}

impl Default for OpportunityFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            keyword: None,
            country: None,
            organization: None,
            research_area: None,
            min_amount: None,
            max_amount: None,
            tags: Vec::new(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn positive_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v >= 1)
        .map(|v| v.min(MAX_PAGING_VALUE))
        .unwrap_or(default)
}

fn parse_amount(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Splits a comma-separated tag list, trimming each name. Blank names are
/// kept: `tags=,` filters on empty names and so matches nothing.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

impl From<&OpportunityQuery> for OpportunityFilter {
    fn from(query: &OpportunityQuery) -> Self {
        Self {
            page: positive_or(query.page.as_deref(), DEFAULT_PAGE),
            per_page: positive_or(query.per_page.as_deref(), DEFAULT_PER_PAGE),
            keyword: non_blank(query.keyword.as_deref()),
            country: non_blank(query.country.as_deref()),
            organization: non_blank(query.organization.as_deref()),
            research_area: non_blank(query.research_area.as_deref()),
            min_amount: parse_amount(query.min_amount.as_deref()),
            max_amount: parse_amount(query.max_amount.as_deref()),
            tags: query
                .tags
                .as_deref()
                .filter(|raw| !raw.is_empty())
                .map(split_tags)
                .unwrap_or_default(),
        }
    }
}

/// `ceil(total / per_page)`, zero for an empty result.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// `LOWER(column) LIKE '%needle%'`, portable across Postgres and SQLite.
fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column.as_column_ref())))
        .like(format!("%{}%", needle.to_lowercase()))
}

/// Builds the filtered, ordered listing query. Active opportunities only.
pub fn build_opportunity_query(filter: &OpportunityFilter) -> Select<funding_opportunity::Entity> {
    let mut query = funding_opportunity::Entity::find()
        .filter(funding_opportunity::Column::Status.eq(OpportunityStatus::Active));

    if let Some(keyword) = &filter.keyword {
        let organizations_named = Query::select()
            .column(organization::Column::Id)
            .from(organization::Entity)
            .and_where(contains_ci(organization::Column::Name, keyword))
            .to_owned();
        query = query.filter(
            Condition::any()
                .add(contains_ci(funding_opportunity::Column::Title, keyword))
                .add(contains_ci(funding_opportunity::Column::Description, keyword))
                .add(funding_opportunity::Column::OrganizationId.in_subquery(organizations_named)),
        );
    }

    if let Some(country) = &filter.country {
        query = query.filter(contains_ci(funding_opportunity::Column::Country, country));
    }

    if let Some(name) = &filter.organization {
        query = query
            .join(JoinType::InnerJoin, funding_opportunity::Relation::Organization.def())
            .filter(contains_ci(organization::Column::Name, name));
    }

    if let Some(name) = &filter.research_area {
        query = query
            .join(JoinType::InnerJoin, funding_opportunity::Relation::ResearchArea.def())
            .filter(contains_ci(research_area::Column::Name, name));
    }

    if let Some(min_amount) = filter.min_amount {
        query = query.filter(funding_opportunity::Column::AmountMax.gte(min_amount));
    }

    if let Some(max_amount) = filter.max_amount {
        query = query.filter(funding_opportunity::Column::AmountMin.lte(max_amount));
    }

    if !filter.tags.is_empty() {
        // Semi-join: one row per opportunity however many requested tags it carries.
        let tagged = Query::select()
            .column((opportunity_tag::Entity, opportunity_tag::Column::OpportunityId))
            .from(opportunity_tag::Entity)
            .inner_join(
                tag::Entity,
                Expr::col((tag::Entity, tag::Column::Id))
                    .equals((opportunity_tag::Entity, opportunity_tag::Column::TagId)),
            )
            .and_where(Expr::col((tag::Entity, tag::Column::Name)).is_in(filter.tags.iter().cloned()))
            .to_owned();
        query = query.filter(funding_opportunity::Column::Id.in_subquery(tagged));
    }

    query
        .order_by_with_nulls(funding_opportunity::Column::Deadline, Order::Asc, NullOrdering::Last)
        .order_by(funding_opportunity::Column::CreatedAt, Order::Desc)
        .order_by(funding_opportunity::Column::Id, Order::Desc)
}
