use std::{io::Write, path::Path};

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::{
    select,
    sync::{mpsc, watch},
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    notify::ConsoleNotifier,
    pomodoro::{
        recorder::SessionRecorder, timer::PomodoroTimer, PomodoroConfig, PomodoroState,
    },
    storage::json_store::JsonFileStore,
    utils::clock::DefaultClock,
};

use super::Args;

#[derive(Debug, Parser)]
pub struct PomodoroCommand {
    #[arg(long, default_value_t = 25, help = "Length of a work phase in minutes")]
    work: u32,
    #[arg(long, default_value_t = 5, help = "Length of a break in minutes")]
    rest: u32,
    #[arg(long, help = "Stop after this many work phases. Runs until ctrl-c by default")]
    cycles: Option<u32>,
}

/// Cancels `shutdown` on ctrl-c. Returns as soon as either happens.
async fn detect_shutdown(shutdown: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            shutdown.cancel();
        },
        _ = shutdown.cancelled() => {}
    };
}

pub async fn process_pomodoro_command(
    PomodoroCommand {
        work,
        rest,
        cycles,
    }: PomodoroCommand,
    storage_dir: &Path,
    colored: bool,
) -> Result<()> {
    let Some(config) = PomodoroConfig::from_minutes(work, rest) else {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Can't run a pomodoro with {work} minutes of work and {rest} of rest"),
            )
            .into());
    };

    let store = JsonFileStore::new(storage_dir.to_owned())?;
    let shutdown = CancellationToken::new();
    let (completions_sender, completions_receiver) = mpsc::channel(16);
    let (updates_sender, mut updates_receiver) = watch::channel(PomodoroState::new(config));

    let timer = PomodoroTimer::new(
        PomodoroState::new(config),
        completions_sender,
        updates_sender,
        shutdown.clone(),
        cycles,
        Box::new(DefaultClock),
    );
    let recorder = SessionRecorder::new(store, Box::new(ConsoleNotifier::new(colored)));

    let shutdown_handle = tokio::spawn(detect_shutdown(shutdown.clone()));
    let recorder_handle = tokio::spawn(recorder.run(completions_receiver));
    let display_handle = tokio::spawn(async move {
        while updates_receiver.changed().await.is_ok() {
            let state = updates_receiver.borrow_and_update().clone();
            print!(
                "\r{}\t{}\t{:>3.0}%",
                state.label(),
                state.display(),
                state.progress() * 100.
            );
            let _ = std::io::stdout().flush();
        }
        println!();
    });

    let state = timer.run().await?;
    shutdown.cancel();

    let stored = recorder_handle.await??;
    display_handle.await?;
    shutdown_handle.await?;
    info!("Pomodoro run stored {stored} sessions");
    println!(
        "{} sesiones completadas, {stored} guardadas",
        state.sessions_completed()
    );
    Ok(())
}
