// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型
///
/// 规范化职位模型以及聚合请求与单源查询
pub mod job_posting;
pub mod job_query;
