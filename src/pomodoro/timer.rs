use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::utils::clock::Clock;

use super::{PomodoroEvent, PomodoroPhase, PomodoroState};

const TICK: Duration = Duration::from_secs(1);

/// Runs a [PomodoroState] in real time. Phases follow each other without waiting for the user,
/// every finished phase is sent on `completions` and every change is published on `updates`.
pub struct PomodoroTimer {
    state: PomodoroState,
    completions: mpsc::Sender<PomodoroEvent>,
    updates: watch::Sender<PomodoroState>,
    shutdown: CancellationToken,
    /// Stop after this many work phases. Runs until cancelled when empty.
    cycles: Option<u32>,
    clock: Box<dyn Clock>,
}

impl PomodoroTimer {
    pub fn new(
        state: PomodoroState,
        completions: mpsc::Sender<PomodoroEvent>,
        updates: watch::Sender<PomodoroState>,
        shutdown: CancellationToken,
        cycles: Option<u32>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            state,
            completions,
            updates,
            shutdown,
            cycles,
            clock,
        }
    }

    fn cycles_done(&self) -> bool {
        self.cycles
            .is_some_and(|cycles| self.state.sessions_completed() >= cycles)
    }

    /// Executes the timer loop and returns the final state.
    pub async fn run(mut self) -> Result<PomodoroState> {
        self.state.start();
        self.updates.send_replace(self.state.clone());
        info!("Pomodoro started: {}", self.state.label());

        let mut next_tick = self.clock.instant();
        loop {
            next_tick += TICK;

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    self.state.pause();
                    self.updates.send_replace(self.state.clone());
                    info!("Pomodoro stopped at {}", self.state.display());
                    return Ok(self.state)
                }
                _ = self.clock.sleep_until(next_tick) => ()
            }

            if let Some(phase) = self.state.tick() {
                let event = PomodoroEvent {
                    phase,
                    finished_at: self.clock.time(),
                    minutes: match phase {
                        PomodoroPhase::Work => self.state.config().work_minutes(),
                        PomodoroPhase::Break => 0,
                    },
                };
                debug!("Phase finished {:?}", event);
                self.completions
                    .send(event)
                    .await
                    .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;

                if self.cycles_done() {
                    self.updates.send_replace(self.state.clone());
                    info!(
                        "Pomodoro finished after {} sessions",
                        self.state.sessions_completed()
                    );
                    return Ok(self.state);
                }
                self.state.start();
            }
            self.updates.send_replace(self.state.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::tempdir;
    use tokio::{
        sync::{mpsc, watch},
        time::Instant,
    };
    use tokio_util::sync::CancellationToken;

    use crate::{
        notify::MockNotifier,
        pomodoro::{
            recorder::SessionRecorder, PomodoroConfig, PomodoroEvent, PomodoroPhase,
            PomodoroState,
        },
        storage::{entities::PomodoroSessionEntity, json_store::JsonFileStore, load_list, StorageKey},
        utils::{clock::Clock, logging::TEST_LOGGING},
    };

    use super::PomodoroTimer;

    #[derive(Clone)]
    struct TestClock {
        start_time: DateTime<Utc>,
        reference: Instant,
    }

    impl TestClock {
        fn new() -> Self {
            Self {
                start_time: Utc.with_ymd_and_hms(2025, 10, 20, 9, 25, 0).unwrap(),
                reference: Instant::now(),
            }
        }
    }

    #[async_trait]
    impl Clock for TestClock {
        fn time(&self) -> DateTime<Utc> {
            self.start_time + self.reference.elapsed()
        }

        fn instant(&self) -> Instant {
            Instant::now()
        }

        async fn sleep_until(&self, instant: tokio::time::Instant) {
            tokio::time::sleep_until(instant).await;
        }
    }

    fn quiet_notifier() -> Box<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        Box::new(notifier)
    }

    fn timer(
        cycles: Option<u32>,
        shutdown: &CancellationToken,
        clock: TestClock,
    ) -> (
        PomodoroTimer,
        mpsc::Receiver<PomodoroEvent>,
        watch::Receiver<PomodoroState>,
    ) {
        let state = PomodoroState::new(PomodoroConfig::from_minutes(1, 1).unwrap());
        let (sender, receiver) = mpsc::channel(4);
        let (updates, watcher) = watch::channel(state.clone());
        (
            PomodoroTimer::new(
                state,
                sender,
                updates,
                shutdown.clone(),
                cycles,
                Box::new(clock),
            ),
            receiver,
            watcher,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn runs_requested_cycles_and_records_sessions() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let clock = TestClock::new();
        let shutdown = CancellationToken::new();
        let (timer, receiver, watcher) = timer(Some(2), &shutdown, clock);
        let recorder =
            SessionRecorder::new(JsonFileStore::new(dir.path().to_owned())?, quiet_notifier());

        let (timer_result, recorded) = tokio::join!(timer.run(), recorder.run(receiver));

        let state = timer_result?;
        assert_eq!(state.sessions_completed(), 2);
        assert_eq!(state.phase(), PomodoroPhase::Break);
        assert_eq!(*watcher.borrow(), state);
        assert_eq!(recorded?, 2);

        let store = JsonFileStore::new(dir.path().to_owned())?;
        let sessions =
            load_list::<PomodoroSessionEntity>(&store, StorageKey::PomodoroSessions).await?;
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].duration, 1);
        assert_eq!(
            sessions[0].date,
            Utc.with_ymd_and_hms(2025, 10, 20, 9, 26, 0).unwrap()
        );
        assert_eq!(
            sessions[1].date,
            Utc.with_ymd_and_hms(2025, 10, 20, 9, 28, 0).unwrap()
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_the_timer() -> Result<()> {
        let clock = TestClock::new();
        let shutdown = CancellationToken::new();
        let (timer, mut receiver, _watcher) = timer(None, &shutdown, clock);

        let (result, _) = tokio::join!(timer.run(), async {
            tokio::time::sleep(Duration::from_millis(90_500)).await;
            shutdown.cancel()
        });

        let state = result?;
        assert_eq!(state.sessions_completed(), 1);
        assert_eq!(state.phase(), PomodoroPhase::Break);
        assert!(state.is_paused());
        assert_eq!(state.display(), "00:30");

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.phase, PomodoroPhase::Work);
        assert_eq!(event.minutes, 1);
        // The sender is gone with the timer.
        assert!(receiver.recv().await.is_none());
        Ok(())
    }
}
