use chrono::Utc;
use fundingportal::entities::OpportunityStatus;
use fundingportal::jobs::POPULATE_SEED;
use fundingportal::sample_data::{
    generate_sample_opportunities, sample_filter_options, sample_records, DEMO_COUNTRIES,
    DEMO_ORGANIZATIONS, DEMO_RESEARCH_AREAS, DEMO_STATISTICS, DEMO_TAGS, SAMPLE_AMOUNTS,
    SAMPLE_BATCH_SIZE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn test_generated_opportunities_follow_the_demo_shape() {
    let today = Utc::now().date_naive();
    let mut rng = StdRng::seed_from_u64(7);

    let batch = generate_sample_opportunities(SAMPLE_BATCH_SIZE, &mut rng);

    assert_eq!(batch.len(), 52);
    for (offset, sample) in batch.iter().enumerate() {
        let i = offset + 1;
        assert_eq!(sample.index, i);
        assert_eq!(sample.title, format!("Sample Grant {} for {}", i, sample.research_area));
        assert!(DEMO_ORGANIZATIONS.contains(&sample.organization));
        assert!(DEMO_RESEARCH_AREAS.contains(&sample.research_area));
        assert!(DEMO_COUNTRIES.contains(&sample.country));
        assert!(SAMPLE_AMOUNTS.contains(&sample.amount_max));
        if let Some(min) = sample.amount_min {
            assert_eq!(min * 5, sample.amount_max * 4);
        }

        let days = (sample.deadline - today).num_days();
        assert!((30..=366).contains(&days), "deadline {} days out", days);

        assert!((1..=3).contains(&sample.tags.len()));
        let unique: HashSet<_> = sample.tags.iter().collect();
        assert_eq!(unique.len(), sample.tags.len());
        assert!(sample.tags.iter().all(|t| DEMO_TAGS.contains(t)));
    }
}

#[test]
fn test_both_amount_min_variants_occur() {
    let mut rng = StdRng::seed_from_u64(11);
    let batch = generate_sample_opportunities(200, &mut rng);

    assert!(batch.iter().any(|s| s.amount_min.is_some()));
    assert!(batch.iter().any(|s| s.amount_min.is_none()));
}

#[test]
fn test_seeded_batches_have_stable_titles() {
    let titles = |seed| {
        generate_sample_opportunities(SAMPLE_BATCH_SIZE, &mut StdRng::seed_from_u64(seed))
            .into_iter()
            .map(|s| s.title)
            .collect::<Vec<_>>()
    };

    assert_eq!(titles(POPULATE_SEED), titles(POPULATE_SEED));
}

#[test]
fn test_sample_records() {
    let records = sample_records(SAMPLE_BATCH_SIZE);

    assert_eq!(records.len(), 52);
    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=52).collect::<Vec<_>>());
    for record in &records {
        assert_eq!(record.status, OpportunityStatus::Active);
        assert_eq!(record.currency, "USD");
        assert_eq!(record.application_url.as_deref(), Some(format!("https://example.com/grant/{}", record.id).as_str()));
        assert_eq!(record.deadline.as_ref().map(String::len), Some(10));
        assert_eq!(record.created_at, record.updated_at);
        let mut sorted = record.tags.clone();
        sorted.sort();
        assert_eq!(record.tags, sorted);
    }
}

#[test]
fn test_demo_fixtures() {
    let options = sample_filter_options();
    assert_eq!(options.countries.len(), 8);
    assert_eq!(options.organizations.len(), 8);
    assert_eq!(options.research_areas.len(), 8);
    assert_eq!(options.tags.len(), 5);

    assert_eq!(DEMO_STATISTICS.active_opportunities, 52);
    assert_eq!(DEMO_STATISTICS.total_funding, 65_100_000);
    assert_eq!(DEMO_STATISTICS.countries, 8);
    assert_eq!(DEMO_STATISTICS.funding_sources, 10);
}
