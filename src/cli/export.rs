use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

use crate::{
    export::{write_backup, write_tasks_csv},
    notify::{ConsoleNotifier, NotificationLevel, Notifier},
    storage::json_store::JsonFileStore,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Every stored list
    Json,
    /// Tasks only
    Csv,
}

#[derive(Debug, Parser)]
pub struct ExportCommand {
    #[arg(long, short, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
    #[arg(long, short, help = "Directory receiving the file. Defaults to the current directory")]
    out: Option<PathBuf>,
}

pub async fn process_export_command(
    ExportCommand { format, out }: ExportCommand,
    storage_dir: &Path,
    now: DateTime<Utc>,
    colored: bool,
) -> Result<()> {
    let store = JsonFileStore::new(storage_dir.to_owned())?;
    let out = match out {
        Some(out) => out,
        None => std::env::current_dir()?,
    };
    let notifier = ConsoleNotifier::new(colored);

    let (path, message) = match format {
        ExportFormat::Json => (
            write_backup(&store, &out, now).await?,
            "Datos exportados en JSON",
        ),
        ExportFormat::Csv => (
            write_tasks_csv(&store, &out, now.date_naive()).await?,
            "Tareas exportadas en CSV",
        ),
    };
    notifier.notify(message, NotificationLevel::Success);
    println!("{}", path.display());
    Ok(())
}
