//! Free-form date normalization
//!
//! Models write dates in whatever format the contract used. Everything is
//! folded into `YYYY-MM-DD`, and anything that cannot be read as a real
//! calendar date becomes [`NormalizedDate::Unknown`].

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Rendered form of [`NormalizedDate::Unknown`]
pub const UNKNOWN_DATE: &str = "unknown";

/// Tokens models use to say "no date"
const EMPTY_TOKENS: &[&str] = &["null", "none", "n/a"];

/// Result of normalizing a date string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedDate {
    Date(NaiveDate),
    Unknown,
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            NormalizedDate::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

/// Order of the two non-year components in a pattern
#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    MonthDay,
    /// Day first, falling back to month first when that is not a real date
    ///
    /// `NN-NN-YYYY` is ambiguous by nature: `03-04-2024` reads as 3 April,
    /// while `12-25-2024` only works as 25 December.
    DayMonth,
}

struct DatePattern {
    regex: Regex,
    order: FieldOrder,
}

impl DatePattern {
    fn new(pattern: &str, order: FieldOrder) -> Self {
        Self {
            regex: Regex::new(pattern).expect("date pattern is a valid regex"),
            order,
        }
    }
}

/// Tried in order; ISO-like forms come before US-style forms
static PATTERNS: LazyLock<[DatePattern; 4]> = LazyLock::new(|| {
    [
        // 2024-07-01
        DatePattern::new(r"(\d{4})-(\d{1,2})-(\d{1,2})", FieldOrder::MonthDay),
        // 07/01/2024
        DatePattern::new(r"(\d{1,2})/(\d{1,2})/(\d{4})", FieldOrder::MonthDay),
        // 01-07-2024
        DatePattern::new(r"(\d{1,2})-(\d{1,2})-(\d{4})", FieldOrder::DayMonth),
        // 2024/07/01
        DatePattern::new(r"(\d{4})/(\d{1,2})/(\d{1,2})", FieldOrder::MonthDay),
    ]
});

/// Normalize a free-form date string to `YYYY-MM-DD`
///
/// The first matching pattern decides the outcome: if its components do not
/// form a valid date the result is `Unknown`, later patterns are not tried.
pub fn normalize_date(input: &str) -> NormalizedDate {
    let input = input.trim();
    if input.is_empty() || EMPTY_TOKENS.iter().any(|t| input.eq_ignore_ascii_case(t)) {
        return NormalizedDate::Unknown;
    }

    for pattern in PATTERNS.iter() {
        let Some(captures) = pattern.regex.captures(input) else {
            continue;
        };

        let groups: Vec<&str> = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect();

        return match split_components(&groups) {
            Some((year, first, second)) => build_date(year, first, second, pattern.order),
            None => NormalizedDate::Unknown,
        };
    }

    NormalizedDate::Unknown
}

/// Split captured groups into `(year, first, second)` using the 4-digit group as the year
fn split_components(groups: &[&str]) -> Option<(i32, u32, u32)> {
    let year_idx = groups.iter().position(|g| g.len() == 4)?;
    let year = groups[year_idx].parse().ok()?;

    let mut rest = groups
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != year_idx)
        .map(|(_, g)| g.parse::<u32>());

    let first = rest.next()?.ok()?;
    let second = rest.next()?.ok()?;
    Some((year, first, second))
}

fn build_date(year: i32, first: u32, second: u32, order: FieldOrder) -> NormalizedDate {
    let date = match order {
        FieldOrder::MonthDay => NaiveDate::from_ymd_opt(year, first, second),
        FieldOrder::DayMonth => NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second)),
    };

    date.map(NormalizedDate::Date)
        .unwrap_or(NormalizedDate::Unknown)
}
