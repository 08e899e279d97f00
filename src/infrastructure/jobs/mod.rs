// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 职位来源模块
///
/// 各招聘网站与职位 API 的适配器实现，以及把它们组合起来的聚合器
pub mod adzuna;
pub mod aggregator;
pub mod factory;
pub mod http_client;
pub mod indeed;
pub mod linkedin;
pub mod naukri;
pub mod rapidapi;
pub mod remoteok;
pub mod sample;
pub(crate) mod scrape;
