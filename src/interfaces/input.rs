//! Turns user selections into `PipelineInput`.

use crate::domain::forecast::PipelineInput;
use chrono::{Days, Months, NaiveDate};

/// Selections used when the user does not provide one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDefaults {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub future_date: NaiveDate,
}

impl InputDefaults {
    /// Ten years back to today, labelled five days ahead.
    pub fn for_today(ticker: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            start: today.checked_sub_months(Months::new(120)).unwrap_or(today),
            end: today,
            future_date: today.checked_add_days(Days::new(5)).unwrap_or(today),
        }
    }
}

/// Parses one interactive line: `TICKER [START [END [FUTURE]]]`.
///
/// Omitted dates take their defaults. A blank line or `-` selects nothing,
/// and a date that does not parse as `YYYY-MM-DD` is left unselected.
pub fn parse_interaction(line: &str, defaults: &InputDefaults) -> PipelineInput {
    let mut tokens = line.split_whitespace();

    let ticker = tokens
        .next()
        .filter(|t| *t != "-")
        .map(str::to_string);

    let mut date = |fallback: NaiveDate| match tokens.next() {
        None => Some(fallback),
        Some("-") => None,
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
    };

    let start = date(defaults.start);
    let end = date(defaults.end);
    let future_date = date(defaults.future_date);

    PipelineInput {
        ticker,
        start,
        end,
        future_date,
    }
}
