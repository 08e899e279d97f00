// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

/// 配额余数（`total % sources`）的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPolicy {
    /// 每个来源分得 `total / sources`，余数不再获取。
    /// 即使各来源结果充足，返回数量也可能比请求少最多 `sources - 1` 条
    #[default]
    DropRemainder,
    /// 按优先级前 `total % sources` 个来源各多分一条
    RedistributeRemainder,
}

/// 将 `total_budget` 分配给 `source_count` 个来源
///
/// 按优先级每个来源一项，总和不超过 `total_budget`
pub fn allocate(total_budget: usize, source_count: usize, policy: QuotaPolicy) -> Vec<usize> {
    if source_count == 0 {
        return Vec::new();
    }

    let base = total_budget / source_count;
    let remainder = total_budget % source_count;

    (0..source_count)
        .map(|i| match policy {
            QuotaPolicy::DropRemainder => base,
            QuotaPolicy::RedistributeRemainder if i < remainder => base + 1,
            QuotaPolicy::RedistributeRemainder => base,
        })
        .collect()
}
