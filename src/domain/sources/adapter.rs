// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job_posting::JobSource;
use crate::domain::models::job_query::SourceQuery;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 各来源默认的单次调用超时时间
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("Timeout")]
    Timeout,
    #[error("Deadline exceeded")]
    DeadlineExceeded,
    #[error("Malformed payload: {0}")]
    ParseError(String),
    #[error("Blocked by anti-bot page")]
    Blocked,
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout
        } else if let Some(status) = e.status() {
            SourceError::HttpStatus(status.as_u16())
        } else if e.is_decode() {
            SourceError::ParseError(e.to_string())
        } else {
            SourceError::NetworkError(e.to_string())
        }
    }
}

/// 从单张抓取结果卡片中提取的字段
///
/// 抓取适配器在 DOM 存活期间将文本复制为自有数据，解析结束后不再借用文档
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlCard {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub posted_date: Option<String>,
}

/// 规范化之前的来源原始记录
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Html(HtmlCard),
    Json(serde_json::Value),
}

/// 聚合器视角下单次适配器调用的结果
///
/// 失败的调用同样产生结果：`records` 为空，`error` 给出原因
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub source: JobSource,
    pub records: Vec<RawRecord>,
    pub error: Option<SourceError>,
    pub elapsed: Duration,
}

impl SourceOutcome {
    pub fn success(source: JobSource, records: Vec<RawRecord>, elapsed: Duration) -> Self {
        Self {
            source,
            records,
            error: None,
            elapsed,
        }
    }

    pub fn failure(source: JobSource, error: SourceError, elapsed: Duration) -> Self {
        Self {
            source,
            records: Vec::new(),
            error: Some(error),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[async_trait]
pub trait JobSourceAdapter: Send + Sync {
    /// 适配器对应的来源
    fn source(&self) -> JobSource;

    /// 适配器是否具备运行条件（凭据）
    fn is_enabled(&self) -> bool {
        true
    }

    fn timeout(&self) -> Duration {
        DEFAULT_SOURCE_TIMEOUT
    }

    /// 获取最多 `query.max_results` 条原始记录
    ///
    /// 未启用的适配器直接返回 `Ok(vec![])`，不发起网络请求
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError>;
}
