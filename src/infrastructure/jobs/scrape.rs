// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::domain::sources::adapter::{HtmlCard, SourceError};
use crate::utils::text::non_blank;

/// 职位卡片选择器
///
/// 描述单个招聘门户结果卡片中各字段所在的 CSS 选择器
#[derive(Debug, Clone, Copy)]
pub(crate) struct CardSelectors {
    pub card: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub salary: Option<&'static str>,
    /// 申请链接所在元素（读取 `href`）
    pub link: &'static str,
    pub description: &'static str,
    /// 发布日期所在的选择器与属性
    pub posted_date: Option<(&'static str, &'static str)>,
}

struct Compiled {
    title: Selector,
    company: Selector,
    location: Selector,
    salary: Option<Selector>,
    link: Selector,
    description: Selector,
    posted_date: Option<(Selector, &'static str)>,
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::ParseError(format!("selector {}: {}", css, e)))
}

impl Compiled {
    fn new(selectors: &CardSelectors) -> Result<Self, SourceError> {
        Ok(Self {
            title: selector(selectors.title)?,
            company: selector(selectors.company)?,
            location: selector(selectors.location)?,
            salary: selectors.salary.map(selector).transpose()?,
            link: selector(selectors.link)?,
            description: selector(selectors.description)?,
            posted_date: selectors
                .posted_date
                .map(|(css, attr)| selector(css).map(|s| (s, attr)))
                .transpose()?,
        })
    }
}

/// 从结果页中提取最多 `limit` 张卡片
///
/// 缺少标题的卡片仍会保留，由规范化阶段填入 `"N/A"`；没有任何可提取字段的
/// 卡片被跳过，不影响同页其余卡片。没有卡片且页面像反爬验证页时返回
/// [`SourceError::Blocked`]，而不是空结果。
pub(crate) fn parse_cards(
    html: &str,
    selectors: &CardSelectors,
    base_url: &str,
    limit: usize,
) -> Result<Vec<HtmlCard>, SourceError> {
    let document = Html::parse_document(html);
    let card_selector = selector(selectors.card)?;
    let compiled = Compiled::new(selectors)?;
    let base = Url::parse(base_url).ok();

    let mut cards = Vec::with_capacity(limit.min(50));
    let mut skipped = 0usize;

    for element in document.select(&card_selector) {
        if cards.len() >= limit {
            break;
        }
        match extract_card(element, &compiled, base.as_ref()) {
            Some(card) => cards.push(card),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(
            "Parsed {} cards, skipped {} empty cards",
            cards.len(),
            skipped
        );
    }

    if cards.is_empty() && looks_blocked(html) {
        return Err(SourceError::Blocked);
    }

    Ok(cards)
}

fn extract_card(element: ElementRef<'_>, sel: &Compiled, base: Option<&Url>) -> Option<HtmlCard> {

    let link = element
        .select(&sel.link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_link(base, href));

    let posted_date = sel.posted_date.as_ref().and_then(|(s, attr)| {
        element
            .select(s)
            .next()
            .and_then(|e| e.value().attr(attr))
            .and_then(|v| non_blank(Some(v)))
    });

    let card = HtmlCard {
        title: first_text(element, &sel.title),
        company: first_text(element, &sel.company),
        location: first_text(element, &sel.location),
        salary: sel.salary.as_ref().and_then(|s| first_text(element, s)),
        description: first_text(element, &sel.description),
        link,
        posted_date,
    };

    (card != HtmlCard::default()).then_some(card)
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|e| non_blank(Some(&e.text().collect::<Vec<_>>().join(" "))))
}

/// 返回 `href` 的绝对地址，相对链接基于门户地址解析
pub(crate) fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href == "#" {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.and_then(|b| b.join(href).ok()).map(|u| u.to_string())
        }
        Err(_) => None,
    }
}

fn looks_blocked(html: &str) -> bool {
    let lower = html.to_lowercase();
    lower.contains("<title>robot check</title>")
        || lower.contains("captcha")
        || lower.contains("authwall")
}
