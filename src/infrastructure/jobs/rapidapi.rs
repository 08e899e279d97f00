// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::models::job_posting::JobSource;
use crate::domain::models::job_query::SourceQuery;
use crate::domain::sources::adapter::{
    JobSourceAdapter, RawRecord, SourceError, DEFAULT_SOURCE_TIMEOUT,
};
use crate::infrastructure::jobs::http_client::json_body;

pub const RAPIDAPI_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
pub const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";

/// RapidAPI 上的 JSearch，未配置 API key 时禁用
pub struct RapidApiAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl RapidApiAdapter {
    pub fn new(client: reqwest::Client, api_key: Option<&str>) -> Self {
        Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            base_url: RAPIDAPI_BASE_URL.to_string(),
            timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl JobSourceAdapter for RapidApiAdapter {
    fn source(&self) -> JobSource {
        JobSource::RapidApi
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("RapidAPI key not set, skipping RapidAPI");
            return Ok(Vec::new());
        };
        if query.max_results == 0 {
            return Ok(Vec::new());
        }

        let search = format!("{} in {}", query.job_title, query.location);
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .timeout(self.timeout)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[
                ("query", search.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("date_posted", "all"),
            ])
            .send()
            .await?;

        let body = json_body(response).await?;
        let data = body
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| SourceError::ParseError("missing `data` array".to_string()))?;

        let records: Vec<RawRecord> = data
            .iter()
            .filter(|job| job.is_object())
            .take(query.max_results)
            .cloned()
            .map(RawRecord::Json)
            .collect();

        info!("Fetched {} jobs from RapidAPI", records.len());
        Ok(records)
    }
}
