//! Date arithmetic shared by the schedule, the month grid and analytics.
//! Everything here works on [NaiveDate] so results never depend on the local timezone.

use chrono::{Datelike, Duration, NaiveDate};

const WEEKDAYS: [&str; 7] = [
    "domingo",
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Short weekday names used as column headers of the month grid.
pub const WEEKDAY_INITIALS: [&str; 7] = ["D", "L", "M", "X", "J", "V", "S"];

/// Signed number of whole days from `from` to `to`.
pub fn whole_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// 0 is Sunday, 6 is Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// `month` is 1-based here, as in chrono.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Works for the last month chrono can represent too, the following month is never built.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
}

/// Returns the Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(weekday_index(date) as i64)
}

/// Long form used for agenda titles, e.g. `lunes, 20 de octubre de 2025`.
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        WEEKDAYS[weekday_index(date) as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Title of a month grid, e.g. `octubre de 2025`. `month` is 1-based.
pub fn month_title(year: i32, month: u32) -> String {
    let name = MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{name} de {year}")
}
