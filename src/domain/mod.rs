// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含职位聚合的核心业务逻辑，包括：
/// - 领域模型（models）：规范化职位与查询请求
/// - 仓库接口（repositories）：结果归档的存储抽象
/// - 来源接口（sources）：职位来源适配器契约
/// - 服务（services）：规范化、去重、配额与回退策略
///
/// 领域层不依赖于任何具体的抓取或 HTTP 实现。
pub mod models;
pub mod repositories;
pub mod services;
pub mod sources;
