// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job_posting::SALARY_NOT_SPECIFIED;

pub const USD: &str = "$";
pub const INR: &str = "₹";

/// 按职位常见格式输出薪资范围
///
/// 零、负数与非有限值视为缺失
pub fn format_salary_range(symbol: &str, min: Option<f64>, max: Option<f64>) -> String {
    let min = min.filter(|v| v.is_finite() && *v > 0.0);
    let max = max.filter(|v| v.is_finite() && *v > 0.0);

    match (min, max) {
        (Some(lo), Some(hi)) => format!(
            "{sym}{}-{sym}{}",
            group_thousands(lo),
            group_thousands(hi),
            sym = symbol
        ),
        (Some(lo), None) => format!("{}{}+", symbol, group_thousands(lo)),
        (None, Some(hi)) => format!("Up to {}{}", symbol, group_thousands(hi)),
        (None, None) => SALARY_NOT_SPECIFIED.to_string(),
    }
}

/// Round to a whole number and insert `,` every three digits.
pub fn group_thousands(value: f64) -> String {
    let digits = (value.round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
