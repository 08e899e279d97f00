// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::job_posting::JobSource;
use crate::domain::models::job_query::SourceQuery;
use crate::domain::sources::adapter::{JobSourceAdapter, RawRecord, SourceError};
use crate::utils::errors::SetupError;

const BUNDLED_SAMPLE_JOBS: &str = include_str!("../../../data/sample_jobs.json");

/// 样例数据适配器
///
/// 实时来源均无结果时使用的静态职位。数据集只解析一次并共享，克隆开销很小。
#[derive(Debug, Clone)]
pub struct SampleAdapter {
    postings: Arc<Vec<Value>>,
}

impl SampleAdapter {
    /// 编译进二进制的内置数据集
    pub fn bundled() -> Result<Self, SetupError> {
        Self::from_json(BUNDLED_SAMPLE_JOBS)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SetupError::SampleData(format!("{}: {}", path.display(), e)))?;
        let adapter = Self::from_json(&content)?;
        info!(
            "Loaded {} sample jobs from {}",
            adapter.len(),
            path.display()
        );
        Ok(adapter)
    }

    /// 解析职位对象组成的 JSON 数组
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let postings: Vec<Value> =
            serde_json::from_str(json).map_err(|e| SetupError::SampleData(e.to_string()))?;

        if let Some(idx) = postings.iter().position(|p| !p.is_object()) {
            return Err(SetupError::SampleData(format!(
                "entry {} is not a JSON object",
                idx
            )));
        }

        Ok(Self {
            postings: Arc::new(postings),
        })
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// 返回标题包含任一查询关键词的职位
    ///
    /// 没有匹配时返回前 `max_results` 条职位
    pub fn select(&self, query: &SourceQuery) -> Vec<Value> {
        let keywords = query.keywords();

        let matching: Vec<Value> = self
            .postings
            .iter()
            .filter(|posting| {
                let title = posting
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_lowercase();
                keywords.iter().any(|k| title.contains(k.as_str()))
            })
            .take(query.max_results)
            .cloned()
            .collect();

        if !matching.is_empty() {
            return matching;
        }

        debug!(
            "No sample job matches '{}', returning general postings",
            query.job_title
        );
        self.postings
            .iter()
            .take(query.max_results)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl JobSourceAdapter for SampleAdapter {
    fn source(&self) -> JobSource {
        JobSource::Sample
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, SourceError> {
        Ok(self
            .select(query)
            .into_iter()
            .map(RawRecord::Json)
            .collect())
    }
}
