use std::fmt::Display;

use chrono::NaiveDate;

/// Inclusive window of dates for which the program is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl ProgramInterval {
    /// Returns `None` when `end` comes before `start`.
    pub fn new_opt(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for ProgramInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
