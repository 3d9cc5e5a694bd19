use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

pub const DATE_HELP: &str =
    "Date to show. Examples are \"today\", \"tomorrow\", \"next monday\", \"20/10/2025\". Defaults to today";

/// Turns a `--date` expression into a calendar day. Missing expressions mean the day of `now`.
pub fn resolve_date(
    expression: Option<&str>,
    style: DateStyle,
    now: DateTime<Local>,
) -> Result<NaiveDate> {
    let Some(expression) = expression else {
        return Ok(now.date_naive());
    };
    match parse_date_string(expression, now, style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {expression:?}: {e}"),
            )
            .into()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{resolve_date, DateStyle};

    fn now() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2025, 11, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn missing_date_is_today() {
        assert_eq!(
            resolve_date(None, DateStyle::Uk, now()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 5).unwrap()
        );
    }

    #[test]
    fn style_decides_day_order() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        assert_eq!(
            resolve_date(Some("20/10/2025"), DateStyle::Uk, now()).unwrap(),
            expected
        );
        assert_eq!(
            resolve_date(Some("10/20/2025"), DateStyle::Us, now()).unwrap(),
            expected
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(resolve_date(Some("not a date at all"), DateStyle::Uk, now()).is_err());
    }
}
