// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含职位实体、来源适配器接口、领域服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供来源适配器、聚合器、存储与指标等外部集成
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
