// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 聚合调用错误
///
/// 来源失败不会出现在这里，它们在各来源内部被吸收
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for AggregationError {
    fn from(e: validator::ValidationErrors) -> Self {
        AggregationError::ValidationError(e.to_string())
    }
}

/// 启动阶段错误
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP客户端错误: {0}")]
    HttpClient(String),

    #[error("样例数据错误: {0}")]
    SampleData(String),
}
