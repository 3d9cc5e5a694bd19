use std::path::Path;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    analytics::{
        goal_progress, habit_streak_for,
        series::{sessions_per_day, tasks_completed_per_day, DailyCount},
        task_status_breakdown, DashboardData,
    },
    storage::json_store::JsonFileStore,
};

const MAX_CHART_DAYS: i64 = 3650;

#[derive(Debug, Parser)]
pub struct StatsCommand {
    #[arg(
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CHART_DAYS),
        help = "Days shown in the completed tasks chart"
    )]
    task_days: u32,
    #[arg(
        long,
        default_value_t = 14,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CHART_DAYS),
        help = "Days shown in the pomodoro sessions chart"
    )]
    session_days: u32,
}

pub async fn process_stats_command(
    command: StatsCommand,
    storage_dir: &Path,
    today: NaiveDate,
) -> Result<()> {
    let store = JsonFileStore::new(storage_dir.to_owned())?;
    let data = DashboardData::load(&store).await?;
    let stats = data.stats(today, &Local);

    println!("Tareas activas\t{}", stats.active_tasks);
    println!("Completadas hoy\t{}", stats.completed_today);
    println!("Racha\t\t{} días", stats.streak);
    println!("Horas de foco\t{}h", stats.focus_hours);
    println!("Sesiones hoy\t{}", stats.sessions_today);

    let breakdown = task_status_breakdown(&data.tasks);
    println!(
        "\nPor hacer {}\tEn progreso {}\tCompletadas {}",
        breakdown.todo, breakdown.in_progress, breakdown.completed
    );

    println!("\nTareas completadas");
    print_series(&tasks_completed_per_day(
        &data.tasks,
        today,
        command.task_days,
        &Local,
    ));
    println!("\nSesiones Pomodoro");
    print_series(&sessions_per_day(
        &data.sessions,
        today,
        command.session_days,
        &Local,
    ));

    if !data.habits.is_empty() {
        println!("\nHábitos");
        for habit in &data.habits {
            println!("{}\t{} días", habit.name, habit_streak_for(habit, today));
        }
    }
    if !data.goals.is_empty() {
        println!("\nMetas");
        for goal in &data.goals {
            println!(
                "{}\t{}/{}\t{}",
                goal.title,
                goal.current,
                goal.target,
                goal_progress(goal)
            );
        }
    }
    Ok(())
}

fn print_series(series: &[DailyCount]) {
    for point in series {
        println!(
            "{}\t{}\t{}",
            point.date.format("%d/%m"),
            point.count,
            "#".repeat(point.count as usize)
        );
    }
}
