//! Display formatting for money, dates and names.
//!
//! Amounts render as Indian rupees with lakh/crore digit grouping
//! (`₹1,23,456.00`); dates render as `15 Jan` in the user's calendar.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{Datelike, NaiveDate};

use crate::net::types::Category;

/// Visual polarity of an amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountTone {
    Positive,
    Negative,
}

impl AmountTone {
    /// Net balances of zero or more read as positive.
    pub fn for_balance(amount: f64) -> Self {
        if amount >= 0.0 { Self::Positive } else { Self::Negative }
    }

    /// Income rows are positive; everything else (including rows without an
    /// embedded type) reads as an expense.
    pub fn for_category(category: Option<Category>) -> Self {
        match category {
            Some(Category::Income) => Self::Positive,
            Some(Category::Expense) | None => Self::Negative,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Positive => "amount amount--positive",
            Self::Negative => "amount amount--negative",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
        }
    }
}

/// `₹1,23,456.78`, with a leading `-` for negative amounts.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0.00".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = group_indian(paise / 100);
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    format!("{sign}₹{rupees}.{:02}", paise % 100)
}

/// Last three digits, then groups of two: `1234567` -> `12,34,567`.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// `2025-01-15` (optionally followed by a time part) -> `15 Jan`.
/// Unparseable input is returned unchanged.
pub fn format_short_date(raw: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => format!("{} {}", date.day(), date.format("%b")),
        Err(_) => raw.to_owned(),
    }
}

/// `12.5` -> `12.5%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// First letter of each word, uppercased: `"Asha Rao"` -> `"AR"`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Swatch colour for the `index`-th category row.
pub fn category_swatch(index: usize) -> String {
    format!("hsl({}, 70%, 50%)", index * 60)
}
