use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::storage::entities::{PomodoroSessionEntity, TaskEntity};

/// One point of a per day chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Stored instants are UTC, charts group them by the user's calendar day.
pub fn local_date<Tz: TimeZone>(moment: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    moment.with_timezone(tz).date_naive()
}

/// Counts `dates` per day for the `days` days ending at `end`, oldest first. Dates outside that
/// window are ignored. A window reaching before the first representable date starts there.
pub fn daily_counts(
    dates: impl IntoIterator<Item = NaiveDate>,
    end: NaiveDate,
    days: u32,
) -> Vec<DailyCount> {
    if days == 0 {
        return vec![];
    }
    let start = end
        .checked_sub_signed(Duration::days(days as i64 - 1))
        .unwrap_or(NaiveDate::MIN);

    let mut counts = HashMap::<NaiveDate, u32>::new();
    for date in dates.into_iter().filter(|d| start <= *d && *d <= end) {
        *counts.entry(date).or_default() += 1;
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DailyCount {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub fn tasks_completed_per_day<Tz: TimeZone>(
    tasks: &[TaskEntity],
    today: NaiveDate,
    days: u32,
    tz: &Tz,
) -> Vec<DailyCount> {
    daily_counts(
        tasks
            .iter()
            .filter_map(|task| task.completed_at.as_ref())
            .map(|moment| local_date(moment, tz)),
        today,
        days,
    )
}

pub fn sessions_per_day<Tz: TimeZone>(
    sessions: &[PomodoroSessionEntity],
    today: NaiveDate,
    days: u32,
    tz: &Tz,
) -> Vec<DailyCount> {
    daily_counts(
        sessions.iter().map(|session| local_date(&session.date, tz)),
        today,
        days,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    use crate::storage::entities::PomodoroSessionEntity;

    use super::{daily_counts, sessions_per_day};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    #[test]
    fn counts_cover_window_oldest_first() {
        let series = daily_counts(
            [date(20), date(22), date(22), date(10), date(27)],
            date(26),
            7,
        );

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, date(20));
        assert_eq!(series[6].date, date(26));
        assert_eq!(
            series.iter().map(|v| v.count).collect::<Vec<_>>(),
            vec![1, 0, 2, 0, 0, 0, 0]
        );
    }

    #[test]
    fn window_is_clamped_to_first_date() {
        let end = NaiveDate::MIN + chrono::Duration::days(2);
        let series = daily_counts([NaiveDate::MIN, end], end, u32::MAX);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, NaiveDate::MIN);
        assert_eq!(series[0].count, 1);
        assert_eq!(series[2].count, 1);
    }

    #[test]
    fn empty_window() {
        assert!(daily_counts([date(20)], date(20), 0).is_empty());
    }

    #[test]
    fn sessions_are_grouped_by_local_day() {
        // 23:30 UTC is already the next day four hours east.
        let sessions = vec![PomodoroSessionEntity {
            date: Utc.with_ymd_and_hms(2025, 10, 21, 23, 30, 0).unwrap(),
            duration: 25,
        }];

        let utc = sessions_per_day(&sessions, date(22), 2, &Utc);
        assert_eq!(utc[0].count, 1);

        let east = FixedOffset::east_opt(4 * 3600).unwrap();
        let local = sessions_per_day(&sessions, date(22), 2, &east);
        assert_eq!(local[0].count, 0);
        assert_eq!(local[1].count, 1);
    }
}
