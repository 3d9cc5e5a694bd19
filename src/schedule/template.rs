use std::{collections::BTreeMap, sync::Arc};

/// One slot of a day. Labels are free text, times are never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBlock {
    pub start_label: Arc<str>,
    pub end_label: Arc<str>,
    pub activity_label: Arc<str>,
    pub is_focus: bool,
}

impl TimeBlock {
    pub fn new(start: &str, end: &str, activity: &str) -> Self {
        Self {
            start_label: start.into(),
            end_label: end.into(),
            activity_label: activity.into(),
            is_focus: false,
        }
    }

    pub fn focus(self) -> Self {
        Self {
            is_focus: true,
            ..self
        }
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_label, self.end_label)
    }
}

/// Ordered time blocks for every weekday, 0 being Sunday.
#[derive(Debug, Clone, Default)]
pub struct WeeklyTemplate {
    days: BTreeMap<u32, Vec<TimeBlock>>,
}

impl WeeklyTemplate {
    pub fn builder() -> WeeklyTemplateBuilder {
        WeeklyTemplateBuilder::default()
    }

    /// Blocks of the given weekday in template order. A weekday without blocks is an empty day.
    pub fn blocks_for(&self, weekday: u32) -> &[TimeBlock] {
        self.days.get(&weekday).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn weekdays(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.keys().copied()
    }
}

#[derive(Debug, Default)]
pub struct WeeklyTemplateBuilder {
    days: BTreeMap<u32, Vec<TimeBlock>>,
}

impl WeeklyTemplateBuilder {
    /// Panics on a weekday outside 0..=6, which is a mistake in the static tables.
    pub fn day(mut self, weekday: u32, blocks: Vec<TimeBlock>) -> Self {
        assert!(weekday < 7, "weekday index {weekday} is outside 0..=6");
        self.days.insert(weekday, blocks);
        self
    }

    pub fn build(self) -> WeeklyTemplate {
        WeeklyTemplate { days: self.days }
    }
}
