// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 职位来源（jobs）：各招聘网站与 API 的适配器以及聚合器
/// - 归档（job_archive）：把聚合结果保存为 JSON 并读回
/// - 可观测性（observability）：来源调用的指标记录
/// - 存储（storage）：本地文件与内存存储实现
///
/// 基础设施层依赖领域层的抽象接口，领域层保持纯粹的业务逻辑。
pub mod job_archive;
pub mod jobs;
pub mod observability;
pub mod storage;
