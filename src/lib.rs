//! Study planner for a year long AI internship. Resolves the weekly template and the curriculum
//! into daily agendas and a month calendar, runs a pomodoro timer and summarizes progress from
//! locally stored lists.
//!

pub mod analytics;
pub mod cli;
pub mod export;
pub mod notify;
pub mod pomodoro;
pub mod schedule;
pub mod storage;
pub mod utils;
