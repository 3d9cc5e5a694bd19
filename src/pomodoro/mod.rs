//! Pomodoro timer: alternating work and break phases.
//!
//! [PomodoroState] is the plain state machine, [timer::PomodoroTimer] drives it once per second
//! and [recorder::SessionRecorder] stores finished work phases.

pub mod recorder;
pub mod timer;

use chrono::{DateTime, Utc};

const SECONDS_IN_MINUTE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroConfig {
    work_seconds: u32,
    rest_seconds: u32,
}

impl PomodoroConfig {
    /// Returns `None` if any phase would be empty.
    pub fn from_minutes(work: u32, rest: u32) -> Option<Self> {
        if work == 0 || rest == 0 {
            return None;
        }
        Some(Self {
            work_seconds: work.checked_mul(SECONDS_IN_MINUTE)?,
            rest_seconds: rest.checked_mul(SECONDS_IN_MINUTE)?,
        })
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_seconds / SECONDS_IN_MINUTE
    }

    fn length_of(&self, phase: PomodoroPhase) -> u32 {
        match phase {
            PomodoroPhase::Work => self.work_seconds,
            PomodoroPhase::Break => self.rest_seconds,
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_seconds: 25 * SECONDS_IN_MINUTE,
            rest_seconds: 5 * SECONDS_IN_MINUTE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroPhase {
    Work,
    Break,
}

/// A finished phase, sent by the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroEvent {
    pub phase: PomodoroPhase,
    pub finished_at: DateTime<Utc>,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroState {
    config: PomodoroConfig,
    phase: PomodoroPhase,
    time_left: u32,
    total_time: u32,
    is_running: bool,
    is_paused: bool,
    sessions_completed: u32,
}

impl PomodoroState {
    pub fn new(config: PomodoroConfig) -> Self {
        Self {
            config,
            phase: PomodoroPhase::Work,
            time_left: config.work_seconds,
            total_time: config.work_seconds,
            is_running: false,
            is_paused: false,
            sessions_completed: 0,
        }
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Returns false if the timer was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        self.is_paused = false;
        true
    }

    /// Only a running timer can be paused.
    pub fn pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        self.is_paused = true;
        true
    }

    /// Stops the timer and refills the current phase.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.is_paused = false;
        self.time_left = self.config.length_of(self.phase);
        self.total_time = self.time_left;
    }

    /// Advances a running timer by one second. Returns the phase that just finished, after which
    /// the timer is stopped on the next phase.
    pub fn tick(&mut self) -> Option<PomodoroPhase> {
        if !self.is_running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            Some(self.complete())
        } else {
            None
        }
    }

    fn complete(&mut self) -> PomodoroPhase {
        let finished = self.phase;
        if finished == PomodoroPhase::Work {
            self.sessions_completed += 1;
        }
        self.phase = match finished {
            PomodoroPhase::Work => PomodoroPhase::Break,
            PomodoroPhase::Break => PomodoroPhase::Work,
        };
        self.is_running = false;
        self.is_paused = false;
        self.time_left = self.config.length_of(self.phase);
        self.total_time = self.time_left;
        finished
    }

    /// `MM:SS` of the time left.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.time_left / SECONDS_IN_MINUTE,
            self.time_left % SECONDS_IN_MINUTE
        )
    }

    /// Elapsed share of the current phase, from 0 to 1.
    pub fn progress(&self) -> f64 {
        if self.total_time == 0 {
            return 0.;
        }
        1. - self.time_left as f64 / self.total_time as f64
    }

    pub fn label(&self) -> &'static str {
        match self.phase {
            PomodoroPhase::Work => "Sesión de Trabajo",
            PomodoroPhase::Break => "Descanso",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PomodoroConfig, PomodoroPhase, PomodoroState};

    fn short_state() -> PomodoroState {
        PomodoroState::new(PomodoroConfig::from_minutes(1, 1).unwrap())
    }

    #[test]
    fn default_is_twenty_five_minutes() {
        let state = PomodoroState::new(PomodoroConfig::default());
        assert_eq!(state.display(), "25:00");
        assert_eq!(state.label(), "Sesión de Trabajo");
        assert_eq!(state.progress(), 0.);
    }

    #[test]
    fn ticks_only_while_running() {
        let mut state = short_state();
        assert_eq!(state.tick(), None);
        assert_eq!(state.time_left(), 60);

        assert!(state.start());
        assert!(!state.start());
        state.tick();
        assert_eq!(state.display(), "00:59");

        assert!(state.pause());
        assert!(state.is_paused());
        assert!(!state.pause());
        state.tick();
        assert_eq!(state.time_left(), 59);
    }

    #[test]
    fn work_completion_switches_to_break() {
        let mut state = short_state();
        state.start();
        let finished = (0..60).filter_map(|_| state.tick()).collect::<Vec<_>>();

        assert_eq!(finished, vec![PomodoroPhase::Work]);
        assert_eq!(state.phase(), PomodoroPhase::Break);
        assert_eq!(state.sessions_completed(), 1);
        assert!(!state.is_running());
        assert_eq!(state.label(), "Descanso");
        assert_eq!(state.display(), "01:00");
    }

    #[test]
    fn break_completion_does_not_count() {
        let mut state = short_state();
        state.start();
        (0..60).for_each(|_| {
            state.tick();
        });
        state.start();
        let finished = (0..60).filter_map(|_| state.tick()).collect::<Vec<_>>();

        assert_eq!(finished, vec![PomodoroPhase::Break]);
        assert_eq!(state.phase(), PomodoroPhase::Work);
        assert_eq!(state.sessions_completed(), 1);
    }

    #[test]
    fn reset_refills_current_phase() {
        let mut state = short_state();
        state.start();
        (0..30).for_each(|_| {
            state.tick();
        });
        assert_eq!(state.progress(), 0.5);

        state.reset();
        assert_eq!(state.time_left(), 60);
        assert!(!state.is_running());
        assert_eq!(state.phase(), PomodoroPhase::Work);
    }

    #[test]
    fn empty_phases_are_rejected() {
        assert!(PomodoroConfig::from_minutes(0, 5).is_none());
        assert!(PomodoroConfig::from_minutes(25, 0).is_none());
    }
}
