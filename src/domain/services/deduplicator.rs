// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use crate::domain::models::job_posting::JobPosting;

/// 职位的跨来源标识：小写标题与小写公司名
///
/// 不包含地点。各来源描述同一地点的粒度不同（"Bangalore" 与
/// "Bengaluru, Karnataka, India"），同一公司同名的两个不同职位会被合并为一个。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    title: String,
    company: String,
}

impl DedupKey {
    pub fn of(posting: &JobPosting) -> Self {
        Self {
            title: posting.title().to_lowercase(),
            company: posting.company().to_lowercase(),
        }
    }
}

/// 去重统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeduplicationStats {
    pub input: usize,
    pub unique: usize,
}

impl DeduplicationStats {
    pub fn dropped(&self) -> usize {
        self.input - self.unique
    }
}

/// 保序去重，同一键保留首次出现的记录
pub fn dedupe(postings: Vec<JobPosting>) -> Vec<JobPosting> {
    dedupe_with_stats(postings).0
}

pub fn dedupe_with_stats(postings: Vec<JobPosting>) -> (Vec<JobPosting>, DeduplicationStats) {
    let input = postings.len();
    let mut seen = HashSet::with_capacity(input);
    let unique: Vec<JobPosting> = postings
        .into_iter()
        .filter(|posting| seen.insert(DedupKey::of(posting)))
        .collect();

    let stats = DeduplicationStats {
        input,
        unique: unique.len(),
    };
    (unique, stats)
}
