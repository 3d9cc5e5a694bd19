pub mod date;
pub mod export;
pub mod pomodoro;
pub mod schedule;
pub mod stats;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use date::{resolve_date, DateStyle, DATE_HELP};
use export::{process_export_command, ExportCommand};
use pomodoro::{process_pomodoro_command, PomodoroCommand};
use schedule::{print_day, print_month, print_topic, print_week, DayCommand, MonthCommand};
use stats::{process_stats_command, StatsCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    schedule::Planner,
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Studyplan", version, long_about = None)]
#[command(about = "Daily schedule, curriculum calendar and pomodoro for the AI internship", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show the agenda of a day")]
    Day {
        #[command(flatten)]
        command: DayCommand,
    },
    #[command(about = "Show the agendas of the week, Sunday to Saturday")]
    Week {
        #[arg(long, short, help = DATE_HELP)]
        date: Option<String>,
    },
    #[command(about = "Show the calendar of a month")]
    Month {
        #[command(flatten)]
        command: MonthCommand,
    },
    #[command(about = "Show the curriculum topic studied on a date")]
    Topic {
        #[arg(long, short, help = DATE_HELP)]
        date: Option<String>,
    },
    #[command(about = "Run a pomodoro timer, finished work sessions are stored")]
    Pomodoro {
        #[command(flatten)]
        command: PomodoroCommand,
    },
    #[command(about = "Show progress statistics")]
    Stats {
        #[command(flatten)]
        command: StatsCommand,
    },
    #[command(about = "Export stored data as a JSON backup or the tasks as CSV")]
    Export {
        #[command(flatten)]
        command: ExportCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let application_dir = match args.dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&application_dir, logging_level, args.log)?;
    debug!("Using application directory {}", application_dir.display());

    let storage_dir = application_dir.join("storage");
    let colored = std::io::stdout().is_terminal();
    let clock = DefaultClock;
    let now = clock.time().with_timezone(&Local);
    let today = clock.today();
    let planner = Planner::internship();
    let date_style = args.date_style;

    match args.commands {
        Commands::Day { command } => {
            let date = resolve_date(command.date.as_deref(), date_style, now)?;
            print_day(&planner, date, command.strict, colored)
        }
        Commands::Week { date } => {
            print_week(
                &planner,
                resolve_date(date.as_deref(), date_style, now)?,
                colored,
            );
            Ok(())
        }
        Commands::Month { command } => {
            let date = resolve_date(command.date.as_deref(), date_style, now)?;
            print_month(&planner, date, &command, today, colored)
        }
        Commands::Topic { date } => {
            print_topic(&planner, resolve_date(date.as_deref(), date_style, now)?);
            Ok(())
        }
        Commands::Pomodoro { command } => {
            process_pomodoro_command(command, &storage_dir, colored).await
        }
        Commands::Stats { command } => process_stats_command(command, &storage_dir, today).await,
        Commands::Export { command } => {
            process_export_command(command, &storage_dir, clock.time(), colored).await
        }
    }
}
