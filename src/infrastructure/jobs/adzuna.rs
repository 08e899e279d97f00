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

pub const ADZUNA_BASE_URL: &str = "https://api.adzuna.com";
pub const ADZUNA_DEFAULT_COUNTRY: &str = "in";

#[derive(Debug, Clone)]
struct AdzunaCredentials {
    app_id: String,
    app_key: String,
}

/// Adzuna 职位搜索 API，需要同时配置 app id 与 app key
pub struct AdzunaAdapter {
    client: reqwest::Client,
    credentials: Option<AdzunaCredentials>,
    country: String,
    base_url: String,
    timeout: Duration,
}

impl AdzunaAdapter {
    pub fn new(client: reqwest::Client, credentials: Option<(&str, &str)>) -> Self {
        let credentials = credentials
            .filter(|(id, key)| !id.trim().is_empty() && !key.trim().is_empty())
            .map(|(app_id, app_key)| AdzunaCredentials {
                app_id: app_id.to_string(),
                app_key: app_key.to_string(),
            });

        Self {
            client,
            credentials,
            country: ADZUNA_DEFAULT_COUNTRY.to_string(),
            base_url: ADZUNA_BASE_URL.to_string(),
            timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into().to_lowercase();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn search_endpoint(&self) -> String {
        format!("{}/v1/api/jobs/{}/search/1", self.base_url, self.country)
    }
}

#[async_trait]
impl JobSourceAdapter for AdzunaAdapter {
    fn source(&self) -> JobSource {
        JobSource::Adzuna
    }

    fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        let Some(credentials) = self.credentials.as_ref() else {
            debug!("Adzuna API credentials not set, skipping Adzuna");
            return Ok(Vec::new());
        };
        if query.max_results == 0 {
            return Ok(Vec::new());
        }

        let per_page = query.max_results.to_string();
        let response = self
            .client
            .get(self.search_endpoint())
            .timeout(self.timeout)
            .query(&[
                ("app_id", credentials.app_id.as_str()),
                ("app_key", credentials.app_key.as_str()),
                ("results_per_page", per_page.as_str()),
                ("what", query.job_title.as_str()),
                ("where", query.location.as_str()),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        let body = json_body(response).await?;
        let results = body
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| SourceError::ParseError("missing `results` array".to_string()))?;

        let records: Vec<RawRecord> = results
            .iter()
            .filter(|job| job.is_object())
            .take(query.max_results)
            .cloned()
            .map(RawRecord::Json)
            .collect();

        info!("Fetched {} jobs from Adzuna", records.len());
        Ok(records)
    }
}
