// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use std::time::Duration;

use crate::config::settings::HttpSettings;
use crate::domain::sources::adapter::SourceError;
use crate::utils::errors::SetupError;

/// 创建所有适配器共享的 HTTP 客户端
///
/// `reqwest::Client` 内部引用计数，适配器持有同一连接池的克隆，不修改其默认设置
pub fn build_http_client(settings: &HttpSettings) -> Result<reqwest::Client, SetupError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .pool_max_idle_per_host(settings.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(settings.pool_idle_timeout_secs))
        .build()
        .map_err(|e| SetupError::HttpClient(e.to_string()))
}

/// GET `url`，返回成功响应的正文
pub(crate) async fn get_text(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, SourceError> {
    let response = client.get(url).timeout(timeout).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Parse a JSON body, mapping decode failures to [`SourceError::ParseError`].
pub(crate) async fn json_body(response: reqwest::Response) -> Result<serde_json::Value, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus(status.as_u16()));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SourceError::ParseError(e.to_string()))
}
