use std::fmt::Display;

use chrono::{Datelike, NaiveDate};

use crate::utils::calendar::{days_in_month, first_of_month, month_title, weekday_index};

use super::bounds::ProgramInterval;

/// A validated year and 0-based month, used to navigate the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    pub fn new_opt(year: i32, month0: u32) -> Option<Self> {
        // Both the first and the last day have to be representable.
        if month0 < 12
            && first_of_month(year, month0 + 1).is_some()
            && days_in_month(year, month0 + 1).is_some()
        {
            Some(Self { year, month0 })
        } else {
            None
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn first_day(&self) -> NaiveDate {
        first_of_month(self.year, self.month0 + 1).expect("YearMonth is validated on creation")
    }

    pub fn day_count(&self) -> u32 {
        days_in_month(self.year, self.month0 + 1).expect("YearMonth is validated on creation")
    }

    pub fn next(&self) -> Option<Self> {
        if self.month0 == 11 {
            Self::new_opt(self.year + 1, 0)
        } else {
            Self::new_opt(self.year, self.month0 + 1)
        }
    }

    pub fn prev(&self) -> Option<Self> {
        if self.month0 == 0 {
            Self::new_opt(self.year - 1, 11)
        } else {
            Self::new_opt(self.year, self.month0 - 1)
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", month_title(self.year, self.month0 + 1))
    }
}

/// One cell of the month grid. Leading blanks have no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub date: Option<NaiveDate>,
    pub in_bounds: bool,
    pub is_today: bool,
}

impl MonthCell {
    const BLANK: MonthCell = MonthCell {
        date: None,
        in_bounds: false,
        is_today: false,
    };

    /// Only dated cells inside the program can be selected.
    pub fn selectable_date(&self) -> Option<NaiveDate> {
        self.date.filter(|_| self.in_bounds)
    }
}

pub struct MonthProjector<'a> {
    interval: &'a ProgramInterval,
}

impl<'a> MonthProjector<'a> {
    pub fn new(interval: &'a ProgramInterval) -> Self {
        Self { interval }
    }

    /// Lays out `month` starting on Sunday. The grid is not padded to full weeks at the end.
    pub fn project(&self, month: YearMonth, today: NaiveDate) -> Vec<MonthCell> {
        let first = month.first_day();
        let leading_blanks = weekday_index(first) as usize;
        let day_count = month.day_count() as usize;

        let mut cells = Vec::with_capacity(leading_blanks + day_count);
        cells.extend(std::iter::repeat(MonthCell::BLANK).take(leading_blanks));
        cells.extend(first.iter_days().take(day_count).map(|date| MonthCell {
            date: Some(date),
            in_bounds: self.interval.contains(date),
            is_today: date == today,
        }));
        cells
    }
}
