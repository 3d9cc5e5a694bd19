//! Numbers behind the dashboard: per day series and summary statistics computed from the stored
//! lists. Everything takes the current date explicitly.

pub mod series;

use anyhow::Result;
use chrono::{Duration, NaiveDate, TimeZone};
use tracing::debug;

use crate::{
    storage::{
        entities::{GoalEntity, HabitEntity, PomodoroSessionEntity, TaskEntity, TaskStatus},
        load_list, KeyValueStore, StorageKey,
    },
    utils::percentage::{ratio_percentage, Percentage},
};

use series::local_date;

/// Streaks are looked up at most this far back.
const MAX_STREAK_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBreakdown {
    pub todo: u32,
    pub in_progress: u32,
    pub completed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_tasks: u32,
    pub completed_today: u32,
    pub streak: u32,
    pub focus_hours: u32,
    pub sessions_today: u32,
}

/// The lists the dashboard reads.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub tasks: Vec<TaskEntity>,
    pub habits: Vec<HabitEntity>,
    pub goals: Vec<GoalEntity>,
    pub sessions: Vec<PomodoroSessionEntity>,
}

impl DashboardData {
    pub async fn load(store: &impl KeyValueStore) -> Result<Self> {
        let (tasks, habits, goals, sessions) = futures::try_join!(
            load_list(store, StorageKey::Tasks),
            load_list(store, StorageKey::Habits),
            load_list(store, StorageKey::Goals),
            load_list(store, StorageKey::PomodoroSessions),
        )?;
        debug!(
            "Loaded {} tasks, {} habits, {} goals, {} sessions",
            tasks.len(),
            habits.len(),
            goals.len(),
            sessions.len()
        );
        Ok(Self {
            tasks,
            habits,
            goals,
            sessions,
        })
    }

    pub fn stats<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> DashboardStats {
        dashboard_stats(&self.tasks, &self.habits, &self.sessions, today, tz)
    }
}

pub fn task_status_breakdown(tasks: &[TaskEntity]) -> StatusBreakdown {
    tasks
        .iter()
        .fold(StatusBreakdown::default(), |mut acc, task| {
            match task.status {
                TaskStatus::Todo => acc.todo += 1,
                TaskStatus::InProgress => acc.in_progress += 1,
                TaskStatus::Completed => acc.completed += 1,
            }
            acc
        })
}

/// Consecutive days up to `today` that satisfy `done`.
fn streak(today: NaiveDate, done: impl Fn(NaiveDate) -> bool) -> u32 {
    (0..MAX_STREAK_DAYS)
        .map(|back| today - Duration::days(back as i64))
        .take_while(|date| done(*date))
        .count() as u32
}

/// Days in a row, ending today, on which at least one habit was done.
pub fn habit_streak(habits: &[HabitEntity], today: NaiveDate) -> u32 {
    if habits.is_empty() {
        return 0;
    }
    streak(today, |date| habits.iter().any(|habit| habit.done_on(date)))
}

pub fn habit_streak_for(habit: &HabitEntity, today: NaiveDate) -> u32 {
    streak(today, |date| habit.done_on(date))
}

pub fn goal_progress(goal: &GoalEntity) -> Percentage {
    ratio_percentage(goal.current, goal.target)
}

pub fn dashboard_stats<Tz: TimeZone>(
    tasks: &[TaskEntity],
    habits: &[HabitEntity],
    sessions: &[PomodoroSessionEntity],
    today: NaiveDate,
    tz: &Tz,
) -> DashboardStats {
    let active_tasks = tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Completed)
        .count() as u32;
    let completed_today = tasks
        .iter()
        .filter_map(|task| task.completed_at.as_ref())
        .filter(|moment| local_date(moment, tz) == today)
        .count() as u32;
    let focus_minutes: u32 = sessions.iter().map(|session| session.duration).sum();
    let sessions_today = sessions
        .iter()
        .filter(|session| local_date(&session.date, tz) == today)
        .count() as u32;

    DashboardStats {
        active_tasks,
        completed_today,
        streak: habit_streak(habits, today),
        focus_hours: focus_minutes / 60,
        sessions_today,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        storage::{
            entities::{
                GoalEntity, HabitEntity, PomodoroSessionEntity, TaskEntity, TaskPriority,
                TaskStatus,
            },
            json_store::JsonFileStore,
            KeyValueStore, StorageKey,
        },
        utils::percentage::Percentage,
    };

    use super::{
        goal_progress, habit_streak, habit_streak_for, task_status_breakdown, DashboardData,
        StatusBreakdown,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 5).unwrap()
    }

    fn task(id: &str, status: TaskStatus, completed_days_ago: Option<i64>) -> TaskEntity {
        TaskEntity {
            id: Arc::from(id),
            title: id.to_string(),
            description: String::new(),
            priority: TaskPriority::Medium,
            status,
            due_date: None,
            tags: vec![],
            created_at: None,
            completed_at: completed_days_ago.map(|days| {
                Utc.from_utc_datetime(&today().and_hms_opt(12, 0, 0).unwrap())
                    - Duration::days(days)
            }),
        }
    }

    fn habit(days_ago: &[i64]) -> HabitEntity {
        HabitEntity {
            id: "h".into(),
            name: "habit".into(),
            description: String::new(),
            frequency: "daily".into(),
            icon: String::new(),
            completed_dates: days_ago.iter().map(|d| today() - Duration::days(*d)).collect(),
            created_at: None,
        }
    }

    fn goal(current: i64, target: i64) -> GoalEntity {
        GoalEntity {
            id: "g".into(),
            title: "goal".into(),
            target,
            current,
            deadline: None,
            created_at: None,
        }
    }

    #[test]
    fn breakdown_counts_each_status() {
        let tasks = vec![
            task("a", TaskStatus::Todo, None),
            task("b", TaskStatus::Todo, None),
            task("c", TaskStatus::InProgress, None),
            task("d", TaskStatus::Completed, Some(0)),
        ];
        assert_eq!(
            task_status_breakdown(&tasks),
            StatusBreakdown {
                todo: 2,
                in_progress: 1,
                completed: 1
            }
        );
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let single = habit(&[0, 1, 2, 4]);
        assert_eq!(habit_streak_for(&single, today()), 3);
        assert_eq!(habit_streak_for(&habit(&[1, 2]), today()), 0);

        // Any habit counts for the combined streak.
        let habits = vec![habit(&[0, 2]), habit(&[1, 3])];
        assert_eq!(habit_streak(&habits, today()), 4);
        assert_eq!(habit_streak(&[], today()), 0);
    }

    #[test]
    fn goal_progress_is_capped() {
        assert_eq!(goal_progress(&goal(5, 10)), Percentage::new_opt(50.).unwrap());
        assert_eq!(goal_progress(&goal(15, 10)), Percentage::FULL);
        assert_eq!(goal_progress(&goal(3, 0)), Percentage::ZERO);
    }

    #[tokio::test]
    async fn stats_from_store() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().to_owned())?;
        store
            .set(
                StorageKey::Tasks,
                &vec![
                    task("a", TaskStatus::Todo, None),
                    task("b", TaskStatus::Completed, Some(0)),
                    task("c", TaskStatus::Completed, Some(1)),
                ],
            )
            .await?;
        store.set(StorageKey::Habits, &vec![habit(&[0, 1])]).await?;
        let sessions = (0..5)
            .map(|i| PomodoroSessionEntity {
                date: Utc.from_utc_datetime(&today().and_hms_opt(9, 0, 0).unwrap())
                    - Duration::days(i % 2),
                duration: 25,
            })
            .collect::<Vec<_>>();
        store.set(StorageKey::PomodoroSessions, &sessions).await?;

        let data = DashboardData::load(&store).await?;
        assert!(data.goals.is_empty());

        let stats = data.stats(today(), &Utc);
        assert_eq!(stats.active_tasks, 1);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.focus_hours, 2);
        assert_eq!(stats.sessions_today, 3);
        Ok(())
    }
}
