// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::domain::models::job_posting::JobSource;
use crate::domain::models::job_query::SourceQuery;
use crate::domain::sources::adapter::{
    JobSourceAdapter, RawRecord, SourceError, DEFAULT_SOURCE_TIMEOUT,
};
use crate::infrastructure::jobs::http_client::json_body;

pub const REMOTEOK_BASE_URL: &str = "https://remoteok.com";

/// RemoteOK 公开数据源
///
/// 接口一次返回全部职位，标题匹配在本地完成
pub struct RemoteOkAdapter {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteOkAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: REMOTEOK_BASE_URL.to_string(),
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

/// 保留标题包含完整查询或任一查询词的职位
///
/// 没有 `position` 的条目（开头的法律声明）不会匹配
pub fn filter_positions(feed: &[Value], query: &SourceQuery) -> Vec<Value> {
    let wanted = query.job_title.to_lowercase();
    let keywords = query.keywords();

    feed.iter()
        .filter(|entry| {
            let Some(position) = entry.get("position").and_then(Value::as_str) else {
                return false;
            };
            let position = position.to_lowercase();
            (!wanted.is_empty() && position.contains(&wanted))
                || keywords.iter().any(|k| position.contains(k.as_str()))
        })
        .take(query.max_results)
        .cloned()
        .collect()
}

#[async_trait]
impl JobSourceAdapter for RemoteOkAdapter {
    fn source(&self) -> JobSource {
        JobSource::RemoteOk
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        if query.max_results == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(format!("{}/api", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;

        let body = json_body(response).await?;
        let feed = body
            .as_array()
            .ok_or_else(|| SourceError::ParseError("expected a JSON array".to_string()))?;

        let records: Vec<RawRecord> = filter_positions(feed, query)
            .into_iter()
            .map(RawRecord::Json)
            .collect();

        info!("Fetched {} jobs from RemoteOK", records.len());
        Ok(records)
    }
}
