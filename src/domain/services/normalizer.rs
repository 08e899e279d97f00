// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use url::Url;

use crate::domain::models::job_posting::{
    JobPosting, JobSource, NO_APPLY_LINK, NO_DESCRIPTION, SALARY_NOT_SPECIFIED, UNKNOWN,
};
use crate::domain::sources::adapter::{HtmlCard, RawRecord};
use crate::utils::salary::{format_salary_range, INR, USD};
use crate::utils::text::{collapse_whitespace, non_blank, strip_markup, truncate_chars};

pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 500;
const REMOTE_LOCATION: &str = "Remote";

/// 从原始记录中提取的字段（尚未填充默认值）
#[derive(Debug, Default)]
struct ExtractedFields {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    salary: Option<String>,
    description: Option<String>,
    apply_link: Option<String>,
    posted_date: Option<String>,
    employment_type: Option<String>,
}

impl ExtractedFields {
    fn from_card(card: &HtmlCard) -> Self {
        Self {
            title: card.title.clone(),
            company: card.company.clone(),
            location: card.location.clone(),
            salary: card.salary.clone(),
            description: card.description.clone(),
            apply_link: card.link.clone(),
            posted_date: card.posted_date.clone(),
            employment_type: None,
        }
    }

    fn from_json(value: &Value, source: JobSource) -> Self {
        match source {
            JobSource::RapidApi => Self {
                title: json_str(value, &["job_title"]),
                company: json_str(value, &["employer_name"]),
                location: json_str(value, &["job_city"]),
                salary: Some(format_salary_range(
                    USD,
                    json_f64(value, "job_min_salary"),
                    json_f64(value, "job_max_salary"),
                )),
                description: json_str(value, &["job_description"]),
                apply_link: json_str(value, &["job_apply_link"]),
                posted_date: json_str(value, &["job_posted_at_datetime_utc"]),
                employment_type: json_str(value, &["job_employment_type"]),
            },
            JobSource::Adzuna => Self {
                title: json_str(value, &["title"]),
                company: json_str(value, &["company", "display_name"]),
                location: json_str(value, &["location", "display_name"]),
                salary: Some(format_salary_range(
                    INR,
                    json_f64(value, "salary_min"),
                    json_f64(value, "salary_max"),
                )),
                description: json_str(value, &["description"]),
                apply_link: json_str(value, &["redirect_url"]),
                posted_date: json_str(value, &["created"]),
                employment_type: json_str(value, &["contract_type"]),
            },
            JobSource::RemoteOk => Self {
                title: json_str(value, &["position"]),
                company: json_str(value, &["company"]),
                location: json_str(value, &["location"]),
                salary: Some(format_salary_range(
                    USD,
                    json_f64(value, "salary_min"),
                    json_f64(value, "salary_max"),
                )),
                description: json_str(value, &["description"]),
                apply_link: json_str(value, &["url"]).or_else(|| json_str(value, &["apply_url"])),
                posted_date: json_str(value, &["date"]),
                employment_type: None,
            },
            // 已是职位结构的记录（内置样例、归档的抓取结果）
            JobSource::LinkedIn | JobSource::Indeed | JobSource::Naukri | JobSource::Sample => {
                Self {
                    title: json_str(value, &["title"]),
                    company: json_str(value, &["company"]),
                    location: json_str(value, &["location"]),
                    salary: json_str(value, &["salary"]),
                    description: json_str(value, &["description"]),
                    apply_link: json_str(value, &["apply_link"]),
                    posted_date: json_str(value, &["posted_date"]),
                    employment_type: json_str(value, &["employment_type"]),
                }
            }
        }
    }
}

/// 职位规范化器
///
/// 将各来源的原始记录映射为 [`JobPosting`]。规范化是全函数：无法提取的字段
/// 一律落到约定的哨兵值，因此不会失败。
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    description_max_chars: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION_MAX_CHARS)
    }
}

impl Normalizer {
    pub fn new(description_max_chars: usize) -> Self {
        Self {
            description_max_chars,
        }
    }

    pub fn description_max_chars(&self) -> usize {
        self.description_max_chars
    }

    pub fn normalize(
        &self,
        raw: &RawRecord,
        source: JobSource,
        requested_location: &str,
    ) -> JobPosting {
        // 卡片文本已由 DOM 解码，只有 JSON 描述携带 HTML 标记
        let (fields, markup) = match raw {
            RawRecord::Html(card) => (ExtractedFields::from_card(card), false),
            RawRecord::Json(value) => (ExtractedFields::from_json(value, source), true),
        };
        self.finish(fields, markup, source, requested_location)
    }

    pub fn normalize_all(
        &self,
        records: &[RawRecord],
        source: JobSource,
        requested_location: &str,
    ) -> Vec<JobPosting> {
        records
            .iter()
            .map(|raw| self.normalize(raw, source, requested_location))
            .collect()
    }

    fn finish(
        &self,
        fields: ExtractedFields,
        markup: bool,
        source: JobSource,
        requested_location: &str,
    ) -> JobPosting {
        let title = non_blank(fields.title.as_deref()).unwrap_or_else(|| UNKNOWN.to_string());
        let company =
            non_blank(fields.company.as_deref()).unwrap_or_else(|| UNKNOWN.to_string());
        let location = non_blank(fields.location.as_deref())
            .unwrap_or_else(|| default_location(source, requested_location));
        let salary = non_blank(fields.salary.as_deref())
            .unwrap_or_else(|| SALARY_NOT_SPECIFIED.to_string());

        let description = fields
            .description
            .as_deref()
            .map(|d| {
                let text = if markup {
                    strip_markup(d)
                } else {
                    collapse_whitespace(d)
                };
                truncate_chars(&text, self.description_max_chars)
            })
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let apply_link = fields
            .apply_link
            .as_deref()
            .and_then(absolute_link)
            .unwrap_or_else(|| NO_APPLY_LINK.to_string());

        let posted_date = fields
            .posted_date
            .as_deref()
            .map(normalize_date)
            .unwrap_or_default();

        let employment_type = non_blank(fields.employment_type.as_deref()).unwrap_or_default();

        JobPosting::from_normalized(
            title,
            company,
            location,
            salary,
            description,
            apply_link,
            source,
            posted_date,
            employment_type,
        )
    }
}

fn default_location(source: JobSource, requested_location: &str) -> String {
    if source == JobSource::RemoteOk {
        return REMOTE_LOCATION.to_string();
    }
    non_blank(Some(requested_location)).unwrap_or_else(|| UNKNOWN.to_string())
}

fn absolute_link(link: &str) -> Option<String> {
    let link = link.trim();
    match Url::parse(link) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url.to_string()),
        _ => None,
    }
}

/// 可识别的时间戳转为 `YYYY-MM-DD`，否则返回去除首尾空白的原文
fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    collapse_whitespace(raw)
}

fn json_str(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_f64(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
