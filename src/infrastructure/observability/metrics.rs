// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::sync::Once;

use crate::domain::models::job_posting::JobSource;

pub const SOURCE_RECORDS_TOTAL: &str = "jobscout_source_records_total";
pub const SOURCE_FAILURES_TOTAL: &str = "jobscout_source_failures_total";
pub const SOURCE_FETCH_SECONDS: &str = "jobscout_source_fetch_seconds";
pub const FALLBACK_TOTAL: &str = "jobscout_fallback_total";

static DESCRIBE: Once = Once::new();

/// 注册指标描述
///
/// 只描述指标，不安装导出器；由宿主程序安装自己的 recorder
pub fn describe_metrics() {
    DESCRIBE.call_once(|| {
        describe_counter!(
            SOURCE_RECORDS_TOTAL,
            "Raw records returned by each job source"
        );
        describe_counter!(
            SOURCE_FAILURES_TOTAL,
            "Job source calls that ended in an error or timeout"
        );
        describe_histogram!(
            SOURCE_FETCH_SECONDS,
            "Duration of one job source call in seconds"
        );
        describe_counter!(
            FALLBACK_TOTAL,
            "Aggregations answered from the sample dataset after live sources came back empty"
        );
    });
}

pub fn record_source_success(source: JobSource, records: usize, seconds: f64) {
    counter!(SOURCE_RECORDS_TOTAL, "source" => source.key()).increment(records as u64);
    histogram!(SOURCE_FETCH_SECONDS, "source" => source.key()).record(seconds);
}

pub fn record_source_failure(source: JobSource, seconds: f64) {
    counter!(SOURCE_FAILURES_TOTAL, "source" => source.key()).increment(1);
    histogram!(SOURCE_FETCH_SECONDS, "source" => source.key()).record(seconds);
}

pub fn record_fallback() {
    counter!(FALLBACK_TOTAL).increment(1);
}
