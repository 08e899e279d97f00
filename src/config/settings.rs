// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::models::job_posting::JobSource;
use crate::domain::services::quota_allocator::QuotaPolicy;

pub const ENV_PREFIX: &str = "JOBSCOUT";

/// 应用程序配置设置
///
/// 包含 HTTP 客户端、聚合策略、来源凭据、样例数据与归档存储等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 共享 HTTP 客户端配置
    pub http: HttpSettings,
    /// 聚合器配置
    pub aggregator: AggregatorSettings,
    /// API 来源凭据
    #[serde(default)]
    pub credentials: CredentialSettings,
    /// 来源端点配置
    #[serde(default)]
    pub sources: SourceSettings,
    /// 样例数据配置
    #[serde(default)]
    pub sample: SampleSettings,
    /// 归档存储配置
    pub storage: StorageSettings,
}

/// HTTP客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 默认 User-Agent
    pub user_agent: String,
    /// 单个来源的请求超时时间（秒）
    pub source_timeout_secs: u64,
    /// 每个主机的最大空闲连接数
    pub pool_max_idle_per_host: usize,
    /// 空闲连接超时时间（秒）
    pub pool_idle_timeout_secs: u64,
}

impl HttpSettings {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

/// 聚合器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorSettings {
    /// 默认搜索地点
    pub default_location: String,
    /// 默认结果数量
    pub default_max_jobs: usize,
    /// 单次聚合调用的截止时间（秒）
    pub deadline_secs: u64,
    /// 同时运行的来源数上限
    pub max_concurrency: usize,
    /// 配额余数策略
    pub quota_policy: QuotaPolicy,
    /// 描述最大字符数
    pub description_max_chars: usize,
    /// 来源优先级（去重时先到者保留）
    pub source_priority: Vec<JobSource>,
}

impl AggregatorSettings {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

/// API凭据配置设置
///
/// 空白值视为未配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialSettings {
    pub rapidapi_key: Option<String>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
}

impl CredentialSettings {
    pub fn rapidapi_key(&self) -> Option<&str> {
        present(&self.rapidapi_key)
    }

    /// 两者均已配置时返回 `(app_id, app_key)`
    pub fn adzuna(&self) -> Option<(&str, &str)> {
        Some((present(&self.adzuna_app_id)?, present(&self.adzuna_app_key)?))
    }
}

/// 读取 `RAPIDAPI_KEY`、`ADZUNA_APP_ID`、`ADZUNA_APP_KEY`，映射到 `credentials` 段
fn unprefixed_credentials() -> Map<String, String> {
    let mut vars = Map::new();
    for (var, key) in [
        ("RAPIDAPI_KEY", "CREDENTIALS__RAPIDAPI_KEY"),
        ("ADZUNA_APP_ID", "CREDENTIALS__ADZUNA_APP_ID"),
        ("ADZUNA_APP_KEY", "CREDENTIALS__ADZUNA_APP_KEY"),
    ] {
        if let Ok(value) = std::env::var(var) {
            vars.insert(key.to_string(), value);
        }
    }
    vars
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// 来源端点配置设置
///
/// 基础地址覆盖用于预发布镜像与测试
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub linkedin_base_url: Option<String>,
    pub indeed_base_url: Option<String>,
    pub naukri_base_url: Option<String>,
    pub rapidapi_base_url: Option<String>,
    pub adzuna_base_url: Option<String>,
    pub remoteok_base_url: Option<String>,
    /// Adzuna 国家代码
    pub adzuna_country: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            linkedin_base_url: None,
            indeed_base_url: None,
            naukri_base_url: None,
            rapidapi_base_url: None,
            adzuna_base_url: None,
            remoteok_base_url: None,
            adzuna_country: "in".to_string(),
        }
    }
}

/// 样例数据配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleSettings {
    /// JSON 数据集路径；未设置时使用内置数据集
    pub dataset_path: Option<String>,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 本地归档路径
    pub local_path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件与 `JOBSCOUT__*` 环境变量加载配置，支持默认值
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env_prefix(ENV_PREFIX)
    }

    /// 与 [`Settings::new`] 相同的分层加载，使用自定义环境变量前缀
    pub fn from_env_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // HTTP defaults
            .set_default(
                "http.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            )?
            .set_default("http.source_timeout_secs", 10)?
            .set_default("http.pool_max_idle_per_host", 10)?
            .set_default("http.pool_idle_timeout_secs", 90)?
            // Aggregator defaults
            .set_default("aggregator.default_location", "India")?
            .set_default("aggregator.default_max_jobs", 10)?
            .set_default("aggregator.deadline_secs", 30)?
            .set_default("aggregator.max_concurrency", 6)?
            .set_default("aggregator.quota_policy", "drop_remainder")?
            .set_default("aggregator.description_max_chars", 500)?
            .set_default(
                "aggregator.source_priority",
                JobSource::LIVE.iter().map(|s| s.key()).collect::<Vec<_>>(),
            )?
            // Source defaults
            .set_default("sources.adzuna_country", "in")?
            // Storage defaults
            .set_default("storage.local_path", "./storage")?;

        builder
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 未加前缀的凭据变量覆盖配置文件，带前缀的形式优先级最高
            .add_source(
                Environment::default()
                    .separator("__")
                    .source(Some(unprefixed_credentials())),
            )
            .add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("aggregator.source_priority"),
            )
            .build()?
            .try_deserialize()
    }
}
