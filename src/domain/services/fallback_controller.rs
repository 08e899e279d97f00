// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackState {
    /// 查询所有启用的实时来源
    Live,
    /// 仅使用内置样例数据（终态）
    Sample,
}

/// 单次调用的实时/样例决策
///
/// 控制器只存活于一次聚合调用，不记录之前的调用，上次失败的来源本次仍会被查询。
#[derive(Debug)]
pub struct FallbackController {
    state: FallbackState,
}

impl FallbackController {
    pub fn start(use_sample_only: bool) -> Self {
        let state = if use_sample_only {
            FallbackState::Sample
        } else {
            FallbackState::Live
        };
        Self { state }
    }

    pub fn state(&self) -> FallbackState {
        self.state
    }

    /// 传入去重后的实时结果数量。结果为空时由 `Live` 转为 `Sample`，否则状态不变
    pub fn observe_live(&mut self, live_count: usize) -> FallbackState {
        if self.state == FallbackState::Live && live_count == 0 {
            info!("No postings from live sources, falling back to sample data");
            self.state = FallbackState::Sample;
        }
        self.state
    }
}
