// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_LOCATION: &str = "India";
pub const DEFAULT_MAX_JOBS: usize = 10;

/// 交给单个来源适配器的查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub job_title: String,
    pub location: String,
    /// 适配器最多可返回的记录数
    pub max_results: usize,
}

impl SourceQuery {
    pub fn new(job_title: impl Into<String>, location: impl Into<String>, max_results: usize) -> Self {
        Self {
            job_title: job_title.into(),
            location: location.into(),
            max_results,
        }
    }

    /// 标题按空白拆分后的小写关键词
    pub fn keywords(&self) -> Vec<String> {
        self.job_title
            .split_whitespace()
            .map(|k| k.to_lowercase())
            .collect()
    }
}

/// 聚合请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AggregationRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub job_title: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,
    #[serde(default)]
    pub use_sample_only: bool,
}

impl AggregationRequest {
    pub fn new(job_title: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            location: default_location(),
            max_jobs: DEFAULT_MAX_JOBS,
            use_sample_only: false,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = max_jobs;
        self
    }

    pub fn sample_only(mut self, use_sample_only: bool) -> Self {
        self.use_sample_only = use_sample_only;
        self
    }

    /// 生成单个来源的查询，携带该来源的配额
    pub fn source_query(&self, max_results: usize) -> SourceQuery {
        SourceQuery::new(self.job_title.trim(), self.location.trim(), max_results)
    }
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_max_jobs() -> usize {
    DEFAULT_MAX_JOBS
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Job title cannot be empty".into());
        return Err(err);
    }
    Ok(())
}
