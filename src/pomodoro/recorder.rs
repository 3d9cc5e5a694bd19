use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info};

use crate::{
    notify::{NotificationLevel, Notifier},
    storage::{append_to_list, entities::PomodoroSessionEntity, KeyValueStore, StorageKey},
};

use super::{PomodoroEvent, PomodoroPhase};

/// Bridges the timer and the store: finished work phases become stored sessions, every finished
/// phase is announced through the [Notifier].
pub struct SessionRecorder<S: KeyValueStore> {
    store: S,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> SessionRecorder<S> {
    pub fn new(store: S, notifier: Box<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Returns true if a session was stored.
    pub async fn record(&self, event: PomodoroEvent) -> Result<bool> {
        match event.phase {
            PomodoroPhase::Work => {
                append_to_list(
                    &self.store,
                    StorageKey::PomodoroSessions,
                    PomodoroSessionEntity {
                        date: event.finished_at,
                        duration: event.minutes,
                    },
                )
                .await?;
                self.notifier.notify(
                    "¡Sesión completada! Toma un descanso",
                    NotificationLevel::Success,
                );
                Ok(true)
            }
            PomodoroPhase::Break => {
                self.notifier
                    .notify("¡Descanso terminado! Vuelve a trabajar", NotificationLevel::Info);
                Ok(false)
            }
        }
    }

    /// Consumes events until the timer goes away. Returns the number of stored sessions.
    pub async fn run(self, mut receiver: Receiver<PomodoroEvent>) -> Result<u32> {
        let mut stored = 0;
        while let Some(event) = receiver.recv().await {
            debug!("Processing event {:?}", event);
            match self.record(event.clone()).await {
                Ok(true) => {
                    stored += 1;
                    info!("Stored session finished at {}", event.finished_at)
                }
                Ok(false) => {}
                Err(e) => {
                    error!("Error storing event {:?}: {e:?}", event);
                    self.notifier
                        .notify("No se pudo guardar la sesión", NotificationLevel::Error);
                }
            }
        }
        receiver.close();
        Ok(stored)
    }
}
