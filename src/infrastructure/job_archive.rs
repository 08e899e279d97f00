// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::models::job_posting::JobPosting;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::utils::text::slugify;

const ARCHIVE_ROOT: &str = "jobs";

/// 归档错误类型
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 职位归档
///
/// 以格式化 JSON 数组保存聚合结果。键形如
/// `jobs/<title-slug>/<UTC 时间戳>-<uuid>.json`，按键排序即按时间排序。
pub struct JobArchive {
    storage: Arc<dyn StorageRepository>,
}

impl JobArchive {
    pub fn new(storage: Arc<dyn StorageRepository>) -> Self {
        Self { storage }
    }

    pub fn archive_key(job_title: &str, saved_at: DateTime<Utc>) -> String {
        format!(
            "{}/{}/{}-{}.json",
            ARCHIVE_ROOT,
            title_dir(job_title),
            saved_at.format("%Y%m%dT%H%M%SZ"),
            Uuid::new_v4().simple()
        )
    }

    /// 使用新生成的键保存，并返回该键
    pub async fn save(&self, job_title: &str, jobs: &[JobPosting]) -> Result<String, ArchiveError> {
        let key = Self::archive_key(job_title, Utc::now());
        self.save_as(&key, jobs).await?;
        Ok(key)
    }

    pub async fn save_as(&self, key: &str, jobs: &[JobPosting]) -> Result<(), ArchiveError> {
        let data = serde_json::to_vec_pretty(jobs)?;
        self.storage.save(key, &data).await?;
        info!("Jobs saved to {}", key);
        Ok(())
    }

    /// 加载归档，键不存在时返回空列表
    pub async fn load(&self, key: &str) -> Result<Vec<JobPosting>, ArchiveError> {
        match self.storage.get(key).await? {
            Some(data) => {
                let jobs: Vec<JobPosting> = serde_json::from_slice(&data)?;
                info!("Loaded {} jobs from {}", jobs.len(), key);
                Ok(jobs)
            }
            None => {
                warn!("Archive not found: {}", key);
                Ok(Vec::new())
            }
        }
    }

    /// 列出归档键（从旧到新），给定标题时只列出该标题
    pub async fn list(&self, job_title: Option<&str>) -> Result<Vec<String>, ArchiveError> {
        let prefix = match job_title {
            Some(title) => format!("{}/{}/", ARCHIVE_ROOT, title_dir(title)),
            None => format!("{}/", ARCHIVE_ROOT),
        };
        Ok(self.storage.list(&prefix).await?)
    }

    /// 加载 `job_title` 最新的归档，没有时返回空列表
    pub async fn load_latest(&self, job_title: &str) -> Result<Vec<JobPosting>, ArchiveError> {
        match self.list(Some(job_title)).await?.last() {
            Some(key) => self.load(key).await,
            None => Ok(Vec::new()),
        }
    }
}

fn title_dir(job_title: &str) -> String {
    let cleaned: String = slugify(job_title)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();
    let slug = cleaned
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
