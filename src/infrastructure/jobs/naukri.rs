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
use crate::utils::text::slugify;

pub const NAUKRI_BASE_URL: &str = "https://www.naukri.com";

// Naukri reuses `span.ellipsis` for several fields, so salary is left to the
// normalizer's default.
const SELECTORS: CardSelectors = CardSelectors {
    card: "div.jobTuple",
    title: "a.title",
    company: "a.subTitle",
    location: "span.ellipsis",
    salary: None,
    link: "a.title[href]",
    description: "div.job-description",
    posted_date: None,
};

pub struct NaukriAdapter {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl NaukriAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: NAUKRI_BASE_URL.to_string(),
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

    /// Naukri encodes the search in the path: `/<title>-jobs-in-<location>`.
    pub fn build_search_url(&self, query: &SourceQuery) -> String {
        format!(
            "{}/{}-jobs-in-{}",
            self.base_url,
            urlencoding::encode(&slugify(&query.job_title)),
            urlencoding::encode(&slugify(&query.location))
        )
    }

    pub fn parse_results(&self, html: &str, limit: usize) -> Result<Vec<HtmlCard>, SourceError> {
        parse_cards(html, &SELECTORS, &self.base_url, limit)
    }
}

#[async_trait]
impl JobSourceAdapter for NaukriAdapter {
    fn source(&self) -> JobSource {
        JobSource::Naukri
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        if query.max_results == 0 {
            return Ok(Vec::new());
        }

        let url = self.build_search_url(query);
        info!("Scraping Naukri for: {} in {}", query.job_title, query.location);

        let html = get_text(&self.client, &url, self.timeout).await?;
        let cards = self.parse_results(&html, query.max_results)?;
        Ok(cards.into_iter().map(RawRecord::Html).collect())
    }
}
