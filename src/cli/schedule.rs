use std::fmt::Write;

use anyhow::{bail, Result};
use ansi_term::{Colour, Style};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use tracing::debug;

use crate::{
    schedule::{
        agenda::DailyAgenda,
        month::{MonthCell, YearMonth},
        Planner,
    },
    utils::calendar::WEEKDAY_INITIALS,
};

use super::date::DATE_HELP;

#[derive(Debug, Parser)]
pub struct DayCommand {
    #[arg(long, short, help = DATE_HELP)]
    pub date: Option<String>,
    #[arg(long, help = "Refuse dates outside of the program")]
    pub strict: bool,
}

#[derive(Debug, Parser)]
pub struct MonthCommand {
    #[arg(long, short, help = DATE_HELP)]
    pub date: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        default_value_t = 0,
        help = "Months to move from the month of --date, negative values go back"
    )]
    pub offset: i32,
    #[arg(long, short, help = "Print the agenda of this day of the shown month")]
    pub select: Option<u32>,
}

pub fn print_day(planner: &Planner, date: NaiveDate, strict: bool, colored: bool) -> Result<()> {
    let agenda = if strict {
        planner.resolve_day_strict(date)?
    } else {
        planner.resolve_day(date)
    };
    print!("{}", render_agenda(&agenda, colored));
    Ok(())
}

pub fn print_week(planner: &Planner, date: NaiveDate, colored: bool) {
    for agenda in planner.resolve_week(date) {
        println!("{}", render_agenda(&agenda, colored));
    }
}

pub fn print_topic(planner: &Planner, date: NaiveDate) {
    let curriculum = planner.curriculum();
    let topic = planner.topic_for_date(date);
    let week = curriculum.week_index(date) + 1;
    match curriculum.topic_index_for_date(date) {
        Some(index) => println!(
            "{date}\tSemana {week}\t{}/{}\t{topic}",
            index + 1,
            curriculum.topics().len()
        ),
        None => println!("{date}\tSemana {week}\t-\t{topic}"),
    }
}

pub fn print_month(
    planner: &Planner,
    date: NaiveDate,
    command: &MonthCommand,
    today: NaiveDate,
    colored: bool,
) -> Result<()> {
    let month = shift_month(YearMonth::containing(date), command.offset)?;
    let cells = planner.project_month(month, today);
    debug!("Projected {} cells for {month}", cells.len());
    print!("{}", render_month(month, &cells, colored));

    if let Some(day) = command.select {
        let Some(cell) = cells.iter().find(|cell| {
            cell.date.is_some_and(|date| date.day() == day)
        }) else {
            bail!("{month} has no day {day}");
        };
        match planner.select(cell) {
            Some(agenda) => print!("\n{}", render_agenda(&agenda, colored)),
            None => bail!("Day {day} of {month} is outside of the program"),
        }
    }
    Ok(())
}

fn shift_month(mut month: YearMonth, offset: i32) -> Result<YearMonth> {
    for _ in 0..offset.unsigned_abs() {
        let shifted = if offset > 0 { month.next() } else { month.prev() };
        let Some(shifted) = shifted else {
            bail!("Can't move {offset} months from {month}");
        };
        month = shifted;
    }
    Ok(month)
}

fn paint(colored: bool, style: Style, text: &str) -> String {
    if colored {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Focus blocks are bold when coloured and starred otherwise.
pub fn render_agenda(agenda: &DailyAgenda, colored: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", paint(colored, Style::new().bold(), &agenda.title));

    for item in &agenda.items {
        let marker = if item.is_focus && !colored { "*" } else { " " };
        let label = if item.is_focus {
            paint(colored, Colour::Yellow.bold(), &item.display_label)
        } else {
            item.display_label.clone()
        };
        let _ = writeln!(out, "{marker} {}\t{label}", item.time_range);
        let _ = writeln!(
            out,
            "\t\t{}",
            paint(colored, Style::new().dimmed(), &item.description)
        );
    }
    out
}

/// Cells are four columns wide. Today is bracketed, days outside the program are dimmed when
/// coloured and parenthesized otherwise.
pub fn render_month(month: YearMonth, cells: &[MonthCell], colored: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", paint(colored, Style::new().bold(), &month.to_string()));
    let header = WEEKDAY_INITIALS
        .iter()
        .map(|initial| format!(" {initial:>2} "))
        .collect::<String>();
    let _ = writeln!(out, "{}", header.trim_end());

    for week in cells.chunks(7) {
        let line = week.iter().map(|cell| render_cell(cell, colored)).collect::<String>();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

fn render_cell(cell: &MonthCell, colored: bool) -> String {
    let Some(date) = cell.date else {
        return "    ".to_string();
    };
    let day = date.day();
    let text = match (cell.is_today, cell.in_bounds, colored) {
        (true, _, _) => format!("[{day:>2}]"),
        (false, false, false) => format!("({day:>2})"),
        _ => format!(" {day:>2} "),
    };
    match (cell.is_today, cell.in_bounds) {
        (true, _) => paint(colored, Colour::Green.bold(), &text),
        (false, false) => paint(colored, Style::new().dimmed(), &text),
        (false, true) => text,
    }
}
