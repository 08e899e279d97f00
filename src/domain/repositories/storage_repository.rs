// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 非法的存储键
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// 存储仓库特质
///
/// 职位归档使用的字节级键值存储。键为以 `/` 分隔的相对路径，
/// 例如 `jobs/data-scientist/20240501T101500Z.json`
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键保存数据到存储中
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键从存储中检索数据
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 列出以指定前缀开头的全部键，按字典序排序
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}
