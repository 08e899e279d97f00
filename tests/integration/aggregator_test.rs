// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{aggregator, aggregator_with, card, card_at, StaticAdapter};
use jobscout::domain::models::job_posting::JobSource;
use jobscout::domain::models::job_query::AggregationRequest;
use jobscout::domain::services::deduplicator::DedupKey;
use jobscout::domain::services::quota_allocator::QuotaPolicy;
use jobscout::domain::sources::adapter::{JobSourceAdapter, RawRecord, SourceError};
use jobscout::infrastructure::jobs::aggregator::AggregatorConfig;
use jobscout::utils::errors::AggregationError;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn three_cards(prefix: &str, company: &str) -> Vec<RawRecord> {
    (1..=3)
        .map(|i| card(&format!("{} {}", prefix, i), company))
        .collect()
}

#[tokio::test]
async fn test_two_sources_fill_budget_in_priority_order() {
    // The higher-priority source answers last; order must not change.
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, three_cards("Data Scientist", "Alpha"))
        .with_delay(Duration::from_millis(50));
    let indeed = StaticAdapter::new(JobSource::Indeed, three_cards("Data Scientist", "Beta"));

    let aggregator = aggregator(vec![Arc::new(linkedin), Arc::new(indeed)]);
    let jobs = aggregator
        .fetch_jobs("Data Scientist", "India", 6, false)
        .await
        .unwrap();

    assert_eq!(jobs.len(), 6);
    let sources: Vec<JobSource> = jobs.iter().map(|j| j.source()).collect();
    assert_eq!(
        sources,
        vec![
            JobSource::LinkedIn,
            JobSource::LinkedIn,
            JobSource::LinkedIn,
            JobSource::Indeed,
            JobSource::Indeed,
            JobSource::Indeed
        ]
    );
    assert_eq!(jobs[0].title(), "Data Scientist 1");
    assert_eq!(jobs[0].company(), "Alpha");
    assert_eq!(jobs[3].company(), "Beta");
    assert_eq!(jobs[0].location(), "India");
}

#[tokio::test]
async fn test_all_sources_disabled_falls_back_to_matching_samples() {
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, three_cards("x", "y")).disabled();
    let calls = linkedin.calls();
    let rapidapi = StaticAdapter::new(JobSource::RapidApi, Vec::new()).disabled();

    let aggregator = aggregator(vec![Arc::new(linkedin), Arc::new(rapidapi)]);
    let jobs = aggregator
        .fetch_jobs("Data Scientist", "India", 5, false)
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!jobs.is_empty());
    assert!(jobs.len() <= 5);
    for job in &jobs {
        assert_eq!(job.source(), JobSource::Sample);
        let title = job.title().to_lowercase();
        assert!(
            title.contains("data") || title.contains("scientist"),
            "unexpected sample job {}",
            job.title()
        );
    }
    assert_eq!(jobs[0].title(), "Data Scientist");
}

#[tokio::test]
async fn test_cross_source_duplicate_keeps_higher_priority_record() {
    let linkedin = StaticAdapter::new(
        JobSource::LinkedIn,
        vec![card_at("Data Scientist", "TechCorp", "Bangalore")],
    );
    let indeed = StaticAdapter::new(
        JobSource::Indeed,
        vec![
            card_at("data scientist", "TECHCORP", "Mumbai"),
            card_at("Data Analyst", "TechCorp", "Mumbai"),
        ],
    );

    let aggregator = aggregator(vec![Arc::new(linkedin), Arc::new(indeed)]);
    let jobs = aggregator
        .fetch_jobs("Data Scientist", "India", 4, false)
        .await
        .unwrap();

    let matching: Vec<_> = jobs
        .iter()
        .filter(|j| j.title().eq_ignore_ascii_case("data scientist"))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].source(), JobSource::LinkedIn);
    assert_eq!(matching[0].location(), "Bangalore");
}

#[tokio::test]
async fn test_blank_title_is_rejected_without_calling_sources() {
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, three_cards("x", "y"));
    let calls = linkedin.calls();

    let aggregator = aggregator(vec![Arc::new(linkedin)]);
    let result = aggregator.fetch_jobs("", "India", 5, false).await;

    assert!(matches!(result, Err(AggregationError::ValidationError(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let result = aggregator.fetch_jobs("   ", "India", 5, true).await;
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sample_only_never_touches_live_sources() {
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, three_cards("Web Developer", "Z"));
    let calls = linkedin.calls();

    let aggregator = aggregator(vec![Arc::new(linkedin)]);
    let jobs = aggregator
        .fetch(&AggregationRequest::new("Web Developer").with_max_jobs(3).sample_only(true))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!jobs.is_empty() && jobs.len() <= 3);
    assert!(jobs.iter().all(|j| j.source() == JobSource::Sample));
}

#[tokio::test]
async fn test_failing_sources_are_absorbed() {
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, Vec::new())
        .failing(SourceError::HttpStatus(503));
    let indeed = StaticAdapter::new(JobSource::Indeed, vec![card("Rust Engineer", "Ferrous")]);

    let aggregator = aggregator(vec![Arc::new(linkedin), Arc::new(indeed)]);
    let jobs = aggregator
        .fetch_jobs("Rust Engineer", "Remote", 4, false)
        .await
        .unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].source(), JobSource::Indeed);
}

#[tokio::test]
async fn test_exhaustion_is_all_or_nothing() {
    let linkedin =
        StaticAdapter::new(JobSource::LinkedIn, Vec::new()).failing(SourceError::Blocked);
    let remoteok = StaticAdapter::new(JobSource::RemoteOk, Vec::new());

    let aggregator = aggregator(vec![Arc::new(linkedin), Arc::new(remoteok)]);
    let jobs = aggregator
        .fetch_jobs("Astronaut", "India", 4, false)
        .await
        .unwrap();

    // No keyword matches, so the first postings of the dataset come back.
    assert_eq!(jobs.len(), 4);
    assert!(jobs.iter().all(|j| j.source() == JobSource::Sample));
}

#[tokio::test]
async fn test_quotas_follow_policy_and_skip_disabled_sources() {
    let build = || {
        let a = StaticAdapter::new(JobSource::LinkedIn, Vec::new());
        let b = StaticAdapter::new(JobSource::Indeed, Vec::new()).disabled();
        let c = StaticAdapter::new(JobSource::Naukri, Vec::new());
        let d = StaticAdapter::new(JobSource::RemoteOk, Vec::new());
        (a, b, c, d)
    };

    // Drop remainder: 10 over three enabled sources.
    let (a, b, c, d) = build();
    let (qa, qb, qc, qd) = (a.quotas(), b.quotas(), c.quotas(), d.quotas());
    let adapters: Vec<Arc<dyn JobSourceAdapter>> =
        vec![Arc::new(a), Arc::new(b), Arc::new(c), Arc::new(d)];
    aggregator(adapters)
        .fetch_jobs("Rust", "India", 10, false)
        .await
        .unwrap();
    assert_eq!(*qa.lock().unwrap(), vec![3]);
    assert!(qb.lock().unwrap().is_empty());
    assert_eq!(*qc.lock().unwrap(), vec![3]);
    assert_eq!(*qd.lock().unwrap(), vec![3]);

    // Redistribute: the first enabled source gets the extra one.
    let (a, b, c, d) = build();
    let (qa, qc, qd) = (a.quotas(), c.quotas(), d.quotas());
    let config = AggregatorConfig {
        quota_policy: QuotaPolicy::RedistributeRemainder,
        ..AggregatorConfig::default()
    };
    let adapters: Vec<Arc<dyn JobSourceAdapter>> =
        vec![Arc::new(a), Arc::new(b), Arc::new(c), Arc::new(d)];
    aggregator_with(adapters, config)
        .fetch_jobs("Rust", "India", 10, false)
        .await
        .unwrap();
    assert_eq!(*qa.lock().unwrap(), vec![4]);
    assert_eq!(*qc.lock().unwrap(), vec![3]);
    assert_eq!(*qd.lock().unwrap(), vec![3]);
}

#[tokio::test]
async fn test_zero_quota_sources_are_not_called() {
    let a = StaticAdapter::new(JobSource::LinkedIn, vec![card("Rust Dev", "A")]);
    let b = StaticAdapter::new(JobSource::Indeed, vec![card("Rust Dev", "B")]);
    let c = StaticAdapter::new(JobSource::Naukri, vec![card("Rust Dev", "C")]);
    let (ca, cb, cc) = (a.calls(), b.calls(), c.calls());

    let config = AggregatorConfig {
        quota_policy: QuotaPolicy::RedistributeRemainder,
        ..AggregatorConfig::default()
    };
    let jobs = aggregator_with(vec![Arc::new(a), Arc::new(b), Arc::new(c)], config)
        .fetch_jobs("Rust Dev", "India", 2, false)
        .await
        .unwrap();

    assert_eq!(ca.load(Ordering::SeqCst), 1);
    assert_eq!(cb.load(Ordering::SeqCst), 1);
    assert_eq!(cc.load(Ordering::SeqCst), 0);
    assert_eq!(jobs.len(), 2);
}

#[tokio::test]
async fn test_adapter_overshooting_quota_is_truncated() {
    let greedy = StaticAdapter::new(
        JobSource::RemoteOk,
        (0..20).map(|i| card(&format!("Job {}", i), "Greedy")).collect(),
    );

    let jobs = aggregator(vec![Arc::new(greedy)])
        .fetch_jobs("Job", "India", 5, false)
        .await
        .unwrap();

    assert_eq!(jobs.len(), 5);
}

fn overlapping_sources() -> Vec<Arc<dyn JobSourceAdapter>> {
    let linkedin = StaticAdapter::new(
        JobSource::LinkedIn,
        vec![
            card("Data Scientist", "A"),
            card("Data Scientist", "A"),
            card("ML Engineer", "B"),
            card("Data Engineer", "C"),
        ],
    );
    let indeed = StaticAdapter::new(
        JobSource::Indeed,
        vec![
            card("ML ENGINEER", "b"),
            card("Analyst", "D"),
            card("Analyst", "E"),
            card("Analyst", "F"),
        ],
    );
    vec![Arc::new(linkedin), Arc::new(indeed)]
}

#[tokio::test]
async fn test_results_respect_budget_and_dedup_invariants() {
    for max_jobs in [1usize, 3, 7, 8, 12] {
        let jobs = aggregator(overlapping_sources())
            .fetch_jobs("Data", "India", max_jobs, false)
            .await
            .unwrap();

        assert!(jobs.len() <= max_jobs);
        let keys: HashSet<DedupKey> = jobs.iter().map(DedupKey::of).collect();
        assert_eq!(keys.len(), jobs.len(), "duplicate key for max_jobs={}", max_jobs);
    }
}

#[tokio::test]
async fn test_zero_budget_returns_empty() {
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, vec![card("Rust Dev", "A")]);
    let calls = linkedin.calls();

    let jobs = aggregator(vec![Arc::new(linkedin)])
        .fetch_jobs("Rust Dev", "India", 0, false)
        .await
        .unwrap();

    assert!(jobs.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_location_uses_configured_default() {
    let linkedin = StaticAdapter::new(JobSource::LinkedIn, vec![card("Rust Dev", "A")]);

    let config = AggregatorConfig {
        default_location: "Bengaluru".to_string(),
        ..AggregatorConfig::default()
    };
    let jobs = aggregator_with(vec![Arc::new(linkedin)], config)
        .fetch_jobs("Rust Dev", "  ", 3, false)
        .await
        .unwrap();

    assert_eq!(jobs[0].location(), "Bengaluru");
}
