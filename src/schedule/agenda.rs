use std::sync::Arc;

use chrono::NaiveDate;
use tracing::trace;

use crate::utils::calendar::{long_date, weekday_index};

use super::{
    curriculum::CurriculumSequence, details::TopicDetailIndex, template::WeeklyTemplate,
};

/// The one activity label whose meaning depends on the date.
pub const GENERIC_STUDY_LABEL: &str = "Estudio Python";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaItem {
    pub time_range: String,
    pub display_label: String,
    pub description: Arc<str>,
    pub is_focus: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAgenda {
    pub date: NaiveDate,
    pub title: String,
    pub items: Vec<AgendaItem>,
}

impl DailyAgenda {
    pub fn focus_items(&self) -> impl Iterator<Item = &AgendaItem> {
        self.items.iter().filter(|v| v.is_focus)
    }
}

/// Turns the weekly template into the agenda of a concrete date.
pub struct DayResolver<'a> {
    template: &'a WeeklyTemplate,
    curriculum: &'a CurriculumSequence,
    details: &'a TopicDetailIndex,
}

impl<'a> DayResolver<'a> {
    pub fn new(
        template: &'a WeeklyTemplate,
        curriculum: &'a CurriculumSequence,
        details: &'a TopicDetailIndex,
    ) -> Self {
        Self {
            template,
            curriculum,
            details,
        }
    }

    /// Resolves any date, including ones outside the program interval: the weekday template
    /// and the week arithmetic are defined everywhere. Items keep template order.
    pub fn resolve_day(&self, date: NaiveDate) -> DailyAgenda {
        let weekday = weekday_index(date);
        let topic = self.curriculum.topic_for_date(date);
        trace!("Resolving {date} weekday {weekday} topic {topic}");

        let items = self
            .template
            .blocks_for(weekday)
            .iter()
            .map(|block| {
                let label = block.activity_label.as_ref();
                let (display_label, description) = if label == GENERIC_STUDY_LABEL {
                    (
                        format!("{label}: {topic}"),
                        self.details.describe(label, Some(&*topic)),
                    )
                } else {
                    (label.to_string(), self.details.describe(label, None))
                };
                AgendaItem {
                    time_range: block.time_range(),
                    display_label,
                    description,
                    is_focus: block.is_focus,
                }
            })
            .collect();

        DailyAgenda {
            date,
            title: long_date(date),
            items,
        }
    }
}
