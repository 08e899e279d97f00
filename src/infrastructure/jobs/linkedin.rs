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

pub const LINKEDIN_BASE_URL: &str = "https://www.linkedin.com";

const SELECTORS: CardSelectors = CardSelectors {
    card: "div.job-search-card",
    title: "h3.base-search-card__title",
    company: "h4.base-search-card__subtitle",
    location: "span.job-search-card__location",
    salary: Some("span.job-search-card__salary-info"),
    link: "a.base-card__full-link[href]",
    description: "p.job-search-card__snippet",
    posted_date: Some(("time[datetime]", "datetime")),
};

/// LinkedIn 公开职位搜索，抓取访客结果页
pub struct LinkedInAdapter {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl LinkedInAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: LINKEDIN_BASE_URL.to_string(),
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
        let params = [
            ("keywords", query.job_title.as_str()),
            ("location", query.location.as_str()),
        ];
        format!(
            "{}/jobs/search/?{}",
            self.base_url,
            serde_urlencoded::to_string(&params[..]).unwrap_or_default()
        )
    }

    pub fn parse_results(&self, html: &str, limit: usize) -> Result<Vec<HtmlCard>, SourceError> {
        parse_cards(html, &SELECTORS, &self.base_url, limit)
    }
}

#[async_trait]
impl JobSourceAdapter for LinkedInAdapter {
    fn source(&self) -> JobSource {
        JobSource::LinkedIn
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        if query.max_results == 0 {
            return Ok(Vec::new());
        }

        let url = self.build_search_url(query);
        info!(
            "Scraping LinkedIn for: {} in {}",
            query.job_title, query.location
        );

        let html = get_text(&self.client, &url, self.timeout).await?;
        let cards = self.parse_results(&html, query.max_results)?;
        Ok(cards.into_iter().map(RawRecord::Html).collect())
    }
}
