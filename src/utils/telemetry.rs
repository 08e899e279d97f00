// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,jobscout=debug";

/// 初始化全局日志订阅器
///
/// `RUST_LOG` 覆盖默认过滤器，`JOBSCOUT_LOG_FORMAT=json` 切换为 JSON 行输出
pub fn init_telemetry() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let json = std::env::var("JOBSCOUT_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    // A subscriber may already be installed by the host or a test harness.
    if let Err(e) = result {
        tracing::debug!("Telemetry already initialized: {}", e);
    }
}
