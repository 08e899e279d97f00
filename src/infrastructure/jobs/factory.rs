// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::domain::models::job_posting::JobSource;
use crate::domain::sources::adapter::JobSourceAdapter;
use crate::infrastructure::jobs::adzuna::AdzunaAdapter;
use crate::infrastructure::jobs::aggregator::{AggregatorConfig, JobAggregator};
use crate::infrastructure::jobs::http_client::build_http_client;
use crate::infrastructure::jobs::indeed::IndeedAdapter;
use crate::infrastructure::jobs::linkedin::LinkedInAdapter;
use crate::infrastructure::jobs::naukri::NaukriAdapter;
use crate::infrastructure::jobs::rapidapi::RapidApiAdapter;
use crate::infrastructure::jobs::remoteok::RemoteOkAdapter;
use crate::infrastructure::jobs::sample::SampleAdapter;
use crate::utils::errors::SetupError;

/// 按来源创建适配器
pub fn create_adapter(
    source: JobSource,
    settings: &Settings,
    client: &reqwest::Client,
) -> Option<Arc<dyn JobSourceAdapter>> {
    let timeout = settings.http.source_timeout();
    let sources = &settings.sources;

    let adapter: Arc<dyn JobSourceAdapter> = match source {
        JobSource::LinkedIn => {
            let mut adapter = LinkedInAdapter::new(client.clone()).with_timeout(timeout);
            if let Some(base) = &sources.linkedin_base_url {
                adapter = adapter.with_base_url(base);
            }
            Arc::new(adapter)
        }
        JobSource::Indeed => {
            let mut adapter = IndeedAdapter::new(client.clone()).with_timeout(timeout);
            if let Some(base) = &sources.indeed_base_url {
                adapter = adapter.with_base_url(base);
            }
            Arc::new(adapter)
        }
        JobSource::Naukri => {
            let mut adapter = NaukriAdapter::new(client.clone()).with_timeout(timeout);
            if let Some(base) = &sources.naukri_base_url {
                adapter = adapter.with_base_url(base);
            }
            Arc::new(adapter)
        }
        JobSource::RapidApi => {
            let mut adapter =
                RapidApiAdapter::new(client.clone(), settings.credentials.rapidapi_key())
                    .with_timeout(timeout);
            if let Some(base) = &sources.rapidapi_base_url {
                adapter = adapter.with_base_url(base);
            }
            Arc::new(adapter)
        }
        JobSource::Adzuna => {
            let mut adapter = AdzunaAdapter::new(client.clone(), settings.credentials.adzuna())
                .with_country(sources.adzuna_country.as_str())
                .with_timeout(timeout);
            if let Some(base) = &sources.adzuna_base_url {
                adapter = adapter.with_base_url(base);
            }
            Arc::new(adapter)
        }
        JobSource::RemoteOk => {
            let mut adapter = RemoteOkAdapter::new(client.clone()).with_timeout(timeout);
            if let Some(base) = &sources.remoteok_base_url {
                adapter = adapter.with_base_url(base);
            }
            Arc::new(adapter)
        }
        // The sample dataset is the fallback, never a live source.
        JobSource::Sample => return None,
    };

    Some(adapter)
}

/// 按配置的优先级创建实时适配器
///
/// 优先级列表中的重复项只查询一次
pub fn build_adapters(
    settings: &Settings,
    client: &reqwest::Client,
) -> Vec<Arc<dyn JobSourceAdapter>> {
    let mut seen = Vec::new();
    let mut adapters = Vec::new();

    for &source in &settings.aggregator.source_priority {
        if seen.contains(&source) {
            warn!("Source {} listed twice in source_priority, ignoring repeat", source);
            continue;
        }
        seen.push(source);

        match create_adapter(source, settings, client) {
            Some(adapter) => {
                if !adapter.is_enabled() {
                    info!("Source {} has no credentials and will be skipped", source);
                }
                adapters.push(adapter);
            }
            None => warn!("Source {} cannot be queried live, ignoring", source),
        }
    }

    adapters
}

/// 加载配置的样例数据集，未配置时使用内置数据集
pub fn load_sample(settings: &Settings) -> Result<SampleAdapter, SetupError> {
    match &settings.sample.dataset_path {
        Some(path) if !path.trim().is_empty() => SampleAdapter::from_file(path),
        _ => SampleAdapter::bundled(),
    }
}

impl JobAggregator {
    /// 根据配置装配聚合器：共享 HTTP 客户端、按优先级排列的来源与样例数据集
    pub fn from_settings(settings: &Settings) -> Result<Self, SetupError> {
        let client = build_http_client(&settings.http)?;
        let adapters = build_adapters(settings, &client);
        let sample = load_sample(settings)?;

        info!(
            "Job aggregator ready with {} live sources and {} sample jobs",
            adapters.len(),
            sample.len()
        );

        Ok(Self::new(
            adapters,
            sample,
            AggregatorConfig::from_settings(&settings.aggregator),
        ))
    }
}
