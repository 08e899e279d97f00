// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 标题或公司未知时的哨兵值
pub const UNKNOWN: &str = "N/A";
/// 缺少薪资信息时的哨兵值
pub const SALARY_NOT_SPECIFIED: &str = "Not specified";
/// 缺少描述时的哨兵值
pub const NO_DESCRIPTION: &str = "No description available";
/// 缺少申请链接时的哨兵值
pub const NO_APPLY_LINK: &str = "#";

/// 职位来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobSource {
    #[serde(rename = "LinkedIn", alias = "linkedin")]
    LinkedIn,
    #[serde(rename = "Indeed", alias = "indeed")]
    Indeed,
    #[serde(rename = "Naukri", alias = "naukri")]
    Naukri,
    #[serde(rename = "RapidAPI", alias = "rapidapi")]
    RapidApi,
    #[serde(rename = "Adzuna", alias = "adzuna")]
    Adzuna,
    #[serde(rename = "RemoteOK", alias = "remoteok")]
    RemoteOk,
    #[serde(rename = "Sample", alias = "sample")]
    Sample,
}

impl JobSource {
    /// 按默认优先级排列的实时来源
    pub const LIVE: [JobSource; 6] = [
        JobSource::LinkedIn,
        JobSource::Indeed,
        JobSource::Naukri,
        JobSource::RapidApi,
        JobSource::Adzuna,
        JobSource::RemoteOk,
    ];

    /// 展示名称，同时用于序列化输出
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn",
            Self::Indeed => "Indeed",
            Self::Naukri => "Naukri",
            Self::RapidApi => "RapidAPI",
            Self::Adzuna => "Adzuna",
            Self::RemoteOk => "RemoteOK",
            Self::Sample => "Sample",
        }
    }

    /// 配置与指标标签中使用的小写键
    pub fn key(&self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::Indeed => "indeed",
            Self::Naukri => "naukri",
            Self::RapidApi => "rapidapi",
            Self::Adzuna => "adzuna",
            Self::RemoteOk => "remoteok",
            Self::Sample => "sample",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for JobSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Self::LinkedIn),
            "indeed" => Ok(Self::Indeed),
            "naukri" => Ok(Self::Naukri),
            "rapidapi" | "jsearch" => Ok(Self::RapidApi),
            "adzuna" => Ok(Self::Adzuna),
            "remoteok" => Ok(Self::RemoteOk),
            "sample" => Ok(Self::Sample),
            other => Err(format!("unknown job source: {}", other)),
        }
    }
}

/// 规范化后的职位
///
/// 所有字段始终有值：缺失的值以上方的哨兵值表示（可选元数据为空字符串），
/// 调用方无需判空。实例由规范化器生成，之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    title: String,
    company: String,
    location: String,
    salary: String,
    description: String,
    apply_link: String,
    source: JobSource,
    #[serde(default)]
    posted_date: String,
    #[serde(default)]
    employment_type: String,
}

impl JobPosting {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_normalized(
        title: String,
        company: String,
        location: String,
        salary: String,
        description: String,
        apply_link: String,
        source: JobSource,
        posted_date: String,
        employment_type: String,
    ) -> Self {
        Self {
            title,
            company,
            location,
            salary,
            description,
            apply_link,
            source,
            posted_date,
            employment_type,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn apply_link(&self) -> &str {
        &self.apply_link
    }

    pub fn source(&self) -> JobSource {
        self.source
    }

    pub fn posted_date(&self) -> &str {
        &self.posted_date
    }

    pub fn employment_type(&self) -> &str {
        &self.employment_type
    }
}
