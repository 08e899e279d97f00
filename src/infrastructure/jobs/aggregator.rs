// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::settings::AggregatorSettings;
use crate::domain::models::job_posting::{JobPosting, JobSource};
use crate::domain::models::job_query::{AggregationRequest, SourceQuery, DEFAULT_LOCATION};
use crate::domain::services::deduplicator::dedupe_with_stats;
use crate::domain::services::fallback_controller::{FallbackController, FallbackState};
use crate::domain::services::normalizer::Normalizer;
use crate::domain::services::quota_allocator::{allocate, QuotaPolicy};
use crate::domain::sources::adapter::{
    JobSourceAdapter, RawRecord, SourceError, SourceOutcome,
};
use crate::infrastructure::jobs::sample::SampleAdapter;
use crate::infrastructure::observability::metrics;
use crate::utils::errors::AggregationError;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENCY: usize = 6;

/// 聚合器配置
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// 请求未给出地点时使用的地点
    pub default_location: String,
    /// 配额余数策略
    pub quota_policy: QuotaPolicy,
    /// 同时运行的来源数上限
    pub max_concurrency: usize,
    /// 单次调用的整体截止时间
    pub deadline: Duration,
    pub normalizer: Normalizer,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            quota_policy: QuotaPolicy::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            deadline: DEFAULT_DEADLINE,
            normalizer: Normalizer::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn from_settings(settings: &AggregatorSettings) -> Self {
        Self {
            default_location: settings.default_location.clone(),
            quota_policy: settings.quota_policy,
            max_concurrency: settings.max_concurrency.max(1),
            deadline: settings.deadline(),
            normalizer: Normalizer::new(settings.description_max_chars),
        }
    }
}

/// 职位聚合器
///
/// 将请求分发给所有实时来源并合并结果。适配器按优先级排列，无论哪个来源
/// 先完成，结果都按该顺序拼接，去重时总是保留优先级最高来源的记录。
pub struct JobAggregator {
    adapters: Vec<Arc<dyn JobSourceAdapter>>,
    sample: SampleAdapter,
    config: AggregatorConfig,
}

impl JobAggregator {
    pub fn new(
        adapters: Vec<Arc<dyn JobSourceAdapter>>,
        sample: SampleAdapter,
        config: AggregatorConfig,
    ) -> Self {
        metrics::describe_metrics();
        Self {
            adapters,
            sample,
            config,
        }
    }

    /// 按查询顺序返回实时来源
    pub fn sources(&self) -> Vec<JobSource> {
        self.adapters.iter().map(|a| a.source()).collect()
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub async fn fetch_jobs(
        &self,
        job_title: &str,
        location: &str,
        max_jobs: usize,
        use_sample_only: bool,
    ) -> Result<Vec<JobPosting>, AggregationError> {
        let request = AggregationRequest::new(job_title)
            .with_location(location)
            .with_max_jobs(max_jobs)
            .sample_only(use_sample_only);
        self.fetch(&request).await
    }

    /// 在配置的截止时间内执行一次聚合
    pub async fn fetch(
        &self,
        request: &AggregationRequest,
    ) -> Result<Vec<JobPosting>, AggregationError> {
        let deadline = Instant::now() + self.config.deadline;
        self.fetch_with_deadline(request, deadline).await
    }

    /// 执行一次必须在 `deadline` 前完成的聚合
    ///
    /// 截止时仍未完成的来源被放弃并视为空结果，只有非法请求会返回错误
    pub async fn fetch_with_deadline(
        &self,
        request: &AggregationRequest,
        deadline: Instant,
    ) -> Result<Vec<JobPosting>, AggregationError> {
        request.validate()?;

        if request.max_jobs == 0 {
            debug!("max_jobs is 0, nothing to fetch");
            return Ok(Vec::new());
        }

        let mut request = request.clone();
        if request.location.trim().is_empty() {
            request.location = self.config.default_location.clone();
        }
        let request = &request;
        let location = request.location.trim();
        let mut fallback = FallbackController::start(request.use_sample_only);

        if fallback.state() == FallbackState::Live {
            let outcomes = self.collect_live(request, deadline).await;

            let mut postings = Vec::new();
            for outcome in &outcomes {
                postings.extend(self.config.normalizer.normalize_all(
                    &outcome.records,
                    outcome.source,
                    location,
                ));
            }

            let (mut unique, stats) = dedupe_with_stats(postings);
            debug!(
                input = stats.input,
                unique = stats.unique,
                dropped = stats.dropped(),
                "Deduplicated live postings"
            );

            if fallback.observe_live(unique.len()) == FallbackState::Live {
                unique.truncate(request.max_jobs);
                info!(
                    "Returning {} unique jobs for '{}'",
                    unique.len(),
                    request.job_title.trim()
                );
                return Ok(unique);
            }

            metrics::record_fallback();
        } else {
            info!("Using sample job data");
        }

        Ok(self.sample_jobs(request, location))
    }

    async fn collect_live(
        &self,
        request: &AggregationRequest,
        deadline: Instant,
    ) -> Vec<SourceOutcome> {
        let enabled: Vec<&Arc<dyn JobSourceAdapter>> = self
            .adapters
            .iter()
            .filter(|adapter| {
                let enabled = adapter.is_enabled();
                if !enabled {
                    debug!(source = %adapter.source(), "Source disabled, skipping");
                }
                enabled
            })
            .collect();

        let quotas = allocate(request.max_jobs, enabled.len(), self.config.quota_policy);

        let calls = enabled
            .into_iter()
            .zip(quotas)
            .filter(|(adapter, quota)| {
                if *quota == 0 {
                    debug!(source = %adapter.source(), "Quota is 0, skipping");
                }
                *quota > 0
            })
            .map(|(adapter, quota)| {
                let query = request.source_query(quota);
                async move { run_adapter(adapter.as_ref(), query, deadline).await }
            });

        stream::iter(calls)
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await
    }

    fn sample_jobs(&self, request: &AggregationRequest, location: &str) -> Vec<JobPosting> {
        let query = request.source_query(request.max_jobs);
        let raw: Vec<_> = self
            .sample
            .select(&query)
            .into_iter()
            .map(RawRecord::Json)
            .collect();

        let postings = self
            .config
            .normalizer
            .normalize_all(&raw, JobSource::Sample, location);
        let (mut unique, _) = dedupe_with_stats(postings);
        unique.truncate(request.max_jobs);

        info!("Returning {} sample jobs", unique.len());
        unique
    }
}

/// 单次适配器调用，受 `min(适配器超时, 截止时间)` 约束
async fn run_adapter(
    adapter: &dyn JobSourceAdapter,
    query: SourceQuery,
    deadline: Instant,
) -> SourceOutcome {
    let source = adapter.source();
    let started = Instant::now();
    let call_limit = started + adapter.timeout();
    let (limit, deadline_bound) = if call_limit < deadline {
        (call_limit, false)
    } else {
        (deadline, true)
    };

    let result = tokio::time::timeout_at(limit, adapter.fetch(&query)).await;
    let elapsed = started.elapsed();

    let outcome = match result {
        Ok(Ok(mut records)) => {
            records.truncate(query.max_results);
            SourceOutcome::success(source, records, elapsed)
        }
        Ok(Err(e)) => SourceOutcome::failure(source, e, elapsed),
        Err(_) if deadline_bound => {
            SourceOutcome::failure(source, SourceError::DeadlineExceeded, elapsed)
        }
        Err(_) => SourceOutcome::failure(source, SourceError::Timeout, elapsed),
    };

    log_outcome(&outcome);
    outcome
}

fn log_outcome(outcome: &SourceOutcome) {
    let elapsed_ms = outcome.elapsed.as_millis() as u64;
    match &outcome.error {
        None => {
            metrics::record_source_success(
                outcome.source,
                outcome.records.len(),
                outcome.elapsed.as_secs_f64(),
            );
            info!(
                source = %outcome.source,
                count = outcome.records.len(),
                elapsed_ms,
                "Source fetch finished"
            );
        }
        Some(error) => {
            metrics::record_source_failure(outcome.source, outcome.elapsed.as_secs_f64());
            warn!(
                source = %outcome.source,
                count = 0,
                elapsed_ms,
                error = %error,
                "Source fetch failed"
            );
        }
    }
}
