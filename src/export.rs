//! Backups of everything stored and a spreadsheet friendly dump of the tasks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::storage::{
    entities::{
        EventEntity, GoalEntity, HabitEntity, NoteEntity, PomodoroSessionEntity, ResourceEntity,
        TaskEntity,
    },
    load_list, KeyValueStore, StorageKey,
};

const TASKS_HEADER: [&str; 6] = [
    "Título",
    "Descripción",
    "Prioridad",
    "Estado",
    "Fecha Límite",
    "Etiquetas",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub tasks: Vec<TaskEntity>,
    pub notes: Vec<NoteEntity>,
    pub habits: Vec<HabitEntity>,
    pub events: Vec<EventEntity>,
    pub resources: Vec<ResourceEntity>,
    pub goals: Vec<GoalEntity>,
    pub pomodoro_sessions: Vec<PomodoroSessionEntity>,
    pub export_date: DateTime<Utc>,
}

impl Backup {
    pub async fn collect(store: &impl KeyValueStore, export_date: DateTime<Utc>) -> Result<Self> {
        let (tasks, notes, habits, events, resources, goals, pomodoro_sessions) = futures::try_join!(
            load_list(store, StorageKey::Tasks),
            load_list(store, StorageKey::Notes),
            load_list(store, StorageKey::Habits),
            load_list(store, StorageKey::Events),
            load_list(store, StorageKey::Resources),
            load_list(store, StorageKey::Goals),
            load_list(store, StorageKey::PomodoroSessions),
        )?;
        Ok(Self {
            tasks,
            notes,
            habits,
            events,
            resources,
            goals,
            pomodoro_sessions,
            export_date,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("plan-pasantia-backup-{}.json", date.format("%Y-%m-%d"))
}

pub fn tasks_file_name(date: NaiveDate) -> String {
    format!("tareas-{}.csv", date.format("%Y-%m-%d"))
}

/// Every field is quoted, tags are joined with `;`.
pub fn tasks_csv(tasks: &[TaskEntity]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);
    writer.write_record(TASKS_HEADER)?;

    for task in tasks {
        let due_date = task
            .due_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writer.write_record([
            task.title.as_str(),
            task.description.as_str(),
            task.priority.as_str(),
            task.status.as_str(),
            due_date.as_str(),
            task.tags.join(";").as_str(),
        ])?;
    }

    let bytes = writer.into_inner().context("Failed to flush tasks csv")?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes the backup into `dir` and returns the file path.
pub async fn write_backup(
    store: &impl KeyValueStore,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let backup = Backup::collect(store, now).await?;
    let path = dir.join(backup_file_name(now.date_naive()));
    fs::write(&path, backup.to_json()?)
        .await
        .with_context(|| format!("Failed to write backup to {}", path.display()))?;
    info!("Backup written to {}", path.display());
    Ok(path)
}

pub async fn write_tasks_csv(
    store: &impl KeyValueStore,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let tasks = load_list::<TaskEntity>(store, StorageKey::Tasks).await?;
    let path = dir.join(tasks_file_name(today));
    fs::write(&path, tasks_csv(&tasks)?)
        .await
        .with_context(|| format!("Failed to write tasks to {}", path.display()))?;
    info!("{} tasks exported to {}", tasks.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    use crate::storage::{
        entities::{PomodoroSessionEntity, TaskEntity, TaskPriority, TaskStatus},
        json_store::JsonFileStore,
        KeyValueStore, StorageKey,
    };

    use super::{tasks_csv, write_backup, write_tasks_csv};

    fn task(title: &str, tags: &[&str]) -> TaskEntity {
        TaskEntity {
            id: "1".into(),
            title: title.to_string(),
            description: String::new(),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            due_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            created_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn csv_quotes_every_field() -> Result<()> {
        let csv = tasks_csv(&[task("Leer \"Fluent Python\"", &["libro", "python"])])?;
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("\"Título\",\"Descripción\",\"Prioridad\",\"Estado\",\"Fecha Límite\",\"Etiquetas\"")
        );
        assert_eq!(
            lines.next(),
            Some("\"Leer \"\"Fluent Python\"\"\",\"\",\"high\",\"in-progress\",\"2025-11-01\",\"libro;python\"")
        );
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[tokio::test]
    async fn exports_land_in_dir() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("storage"))?;
        store.set(StorageKey::Tasks, &vec![task("a", &[])]).await?;
        store
            .set(
                StorageKey::PomodoroSessions,
                &vec![PomodoroSessionEntity {
                    date: Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap(),
                    duration: 25,
                }],
            )
            .await?;

        let now = Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap();
        let backup = write_backup(&store, dir.path(), now).await?;
        assert_eq!(
            backup.file_name().and_then(|name| name.to_str()),
            Some("plan-pasantia-backup-2025-11-02.json")
        );

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&backup)?)?;
        for key in StorageKey::ALL {
            assert!(json[key.as_str()].is_array(), "{key} missing from backup");
        }
        assert_eq!(json["tasks"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["notes"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["pomodoroSessions"][0]["duration"], 25);
        assert_eq!(json["exportDate"], "2025-11-02T10:00:00Z");

        let csv = write_tasks_csv(&store, dir.path(), now.date_naive()).await?;
        assert!(csv.ends_with("tareas-2025-11-02.csv"));
        assert_eq!(std::fs::read_to_string(csv)?.lines().count(), 2);
        Ok(())
    }
}
