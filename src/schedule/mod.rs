//! Resolution of the internship schedule.
//!
//! [Planner] owns the fixed configuration: the program interval, the weekly template, the
//! curriculum and the detail texts. It is built once and only ever read. Every entry point takes
//! plain dates, the current date included, so nothing here touches a clock.

pub mod agenda;
pub mod bounds;
pub mod curriculum;
pub mod details;
pub mod month;
pub mod program;
pub mod template;

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::utils::calendar::week_start;

use agenda::{DailyAgenda, DayResolver};
use bounds::ProgramInterval;
use curriculum::CurriculumSequence;
use details::TopicDetailIndex;
use month::{MonthCell, MonthProjector, YearMonth};
use template::WeeklyTemplate;

#[derive(Debug, Clone)]
pub struct Planner {
    interval: ProgramInterval,
    template: WeeklyTemplate,
    curriculum: CurriculumSequence,
    details: TopicDetailIndex,
}

impl Planner {
    pub fn new(
        interval: ProgramInterval,
        template: WeeklyTemplate,
        curriculum: CurriculumSequence,
        details: TopicDetailIndex,
    ) -> Self {
        Self {
            interval,
            template,
            curriculum,
            details,
        }
    }

    /// The AI internship program starting on 2025-10-20.
    pub fn internship() -> Self {
        Self::new(
            program::program_interval(),
            program::weekly_template(),
            program::curriculum(),
            program::topic_details(),
        )
    }

    pub fn interval(&self) -> &ProgramInterval {
        &self.interval
    }

    pub fn curriculum(&self) -> &CurriculumSequence {
        &self.curriculum
    }

    pub fn topic_for_date(&self, date: NaiveDate) -> Arc<str> {
        self.curriculum.topic_for_date(date)
    }

    fn resolver(&self) -> DayResolver<'_> {
        DayResolver::new(&self.template, &self.curriculum, &self.details)
    }

    /// Agenda of any date. Dates outside the program still resolve.
    pub fn resolve_day(&self, date: NaiveDate) -> DailyAgenda {
        self.resolver().resolve_day(date)
    }

    /// Same as [Planner::resolve_day] but refuses dates outside the program interval.
    pub fn resolve_day_strict(&self, date: NaiveDate) -> Result<DailyAgenda> {
        if date < self.interval.start() {
            bail!("{date} is before the program starts on {}", self.interval.start());
        }
        if date > self.interval.end() {
            bail!("{date} is after the program ends on {}", self.interval.end());
        }
        Ok(self.resolve_day(date))
    }

    /// Agendas from Sunday to Saturday of the week containing `date`.
    pub fn resolve_week(&self, date: NaiveDate) -> Vec<DailyAgenda> {
        let resolver = self.resolver();
        let start = week_start(date);
        debug!("Resolving week starting {start}");
        (0..7)
            .map(|offset| resolver.resolve_day(start + Duration::days(offset)))
            .collect()
    }

    pub fn project_month(&self, month: YearMonth, today: NaiveDate) -> Vec<MonthCell> {
        MonthProjector::new(&self.interval).project(month, today)
    }

    /// Selecting a grid cell opens its day. Blanks and days outside the program can't be
    /// selected.
    pub fn select(&self, cell: &MonthCell) -> Option<DailyAgenda> {
        cell.selectable_date().map(|date| self.resolve_day(date))
    }
}
