use std::sync::Arc;

use chrono::NaiveDate;

use crate::utils::calendar::whole_days_between;

/// Weekly topic plan. Week `n` after the anchor date studies `topics[n]`, once the list runs out
/// the fallback topic is used.
#[derive(Debug, Clone)]
pub struct CurriculumSequence {
    anchor: NaiveDate,
    topics: Vec<Arc<str>>,
    fallback: Arc<str>,
}

impl CurriculumSequence {
    pub fn new(anchor: NaiveDate, topics: Vec<Arc<str>>, fallback: Arc<str>) -> Self {
        Self {
            anchor,
            topics,
            fallback,
        }
    }

    pub fn topics(&self) -> &[Arc<str>] {
        &self.topics
    }

    pub fn fallback(&self) -> &Arc<str> {
        &self.fallback
    }

    /// Whole weeks between the anchor and `date`. The distance is absolute, so a date `n` days
    /// before the anchor lands in the same week as the date `n` days after it.
    pub fn week_index(&self, date: NaiveDate) -> u64 {
        whole_days_between(self.anchor, date).unsigned_abs() / 7
    }

    /// Position of the topic studied on `date`, `None` once the sequence is exhausted.
    pub fn topic_index_for_date(&self, date: NaiveDate) -> Option<usize> {
        usize::try_from(self.week_index(date))
            .ok()
            .filter(|index| *index < self.topics.len())
    }

    pub fn topic_for_date(&self, date: NaiveDate) -> Arc<str> {
        match self.topic_index_for_date(date) {
            Some(index) => self.topics[index].clone(),
            None => self.fallback.clone(),
        }
    }
}
