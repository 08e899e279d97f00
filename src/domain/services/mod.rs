// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 职位聚合管道中与 I/O 无关的部分：
/// - 规范化（normalizer）：原始记录到统一职位模型
/// - 去重（deduplicator）：按 (标题, 公司) 去重，先到者保留
/// - 配额分配（quota_allocator）：在各来源间拆分结果预算
/// - 回退控制（fallback_controller）：实时来源与样例数据之间的切换
pub mod deduplicator;
pub mod fallback_controller;
pub mod normalizer;
pub mod quota_allocator;
