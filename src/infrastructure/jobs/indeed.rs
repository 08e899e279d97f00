// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::domain::models::job_posting::JobSource;
use crate::domain::models::job_query::SourceQuery;
use crate::domain::sources::adapter::{
    HtmlCard, JobSourceAdapter, RawRecord, SourceError, DEFAULT_SOURCE_TIMEOUT,
};
use crate::infrastructure::jobs::http_client::get_text;
use crate::infrastructure::jobs::scrape::{parse_cards, CardSelectors};

pub const INDEED_BASE_URL: &str = "https://in.indeed.com";

const SELECTORS: CardSelectors = CardSelectors {
    card: "div.job_seen_beacon",
    title: "h2.jobTitle",
    company: "span.companyName",
    location: "div.companyLocation",
    salary: Some("span.salary-snippet"),
    link: "h2.jobTitle a[href]",
    description: "div.job-snippet",
    posted_date: None,
};

/// Indeed 印度站搜索结果
///
/// 结果链接为站内相对路径（`/rc/clk?jk=...`），基于配置的基础地址解析
pub struct IndeedAdapter {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl IndeedAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: INDEED_BASE_URL.to_string(),
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

    pub fn build_search_url(&self, query: &SourceQuery) -> String {
        let params = [("q", query.job_title.as_str()), ("l", query.location.as_str())];
        format!(
            "{}/jobs?{}",
            self.base_url,
            serde_urlencoded::to_string(&params[..]).unwrap_or_default()
        )
    }

    pub fn parse_results(&self, html: &str, limit: usize) -> Result<Vec<HtmlCard>, SourceError> {
        parse_cards(html, &SELECTORS, &self.base_url, limit)
    }
}

#[async_trait]
impl JobSourceAdapter for IndeedAdapter {
    fn source(&self) -> JobSource {
        JobSource::Indeed
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        if query.max_results == 0 {
            return Ok(Vec::new());
        }

        let url = self.build_search_url(query);
        info!("Scraping Indeed for: {} in {}", query.job_title, query.location);

        let html = get_text(&self.client, &url, self.timeout).await?;
        let cards = self.parse_results(&html, query.max_results)?;
        Ok(cards.into_iter().map(RawRecord::Html).collect())
    }
}
