// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile HTML clean regex"));

/// 去除首尾空白，并将连续空白折叠为单个空格
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 移除 HTML 标签并解码实体，同时折叠空白
pub fn strip_markup(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    collapse_whitespace(&decoded)
}

/// 将 `text` 截断为最多 `max_chars` 个字符
///
/// 按 Unicode 标量值计数，多字节字符不会被截断，但由多个标量组成的字素簇可能被截断
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Collapsed text, or `None` when nothing but whitespace is left.
pub fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(collapse_whitespace).filter(|t| !t.is_empty())
}

/// `"Data Scientist"` -> `"data-scientist"`
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
