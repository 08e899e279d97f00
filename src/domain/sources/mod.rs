// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 职位来源领域模块
///
/// 定义职位来源适配器接口、原始记录以及单源调用结果
pub mod adapter;
