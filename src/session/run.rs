use std::time::Instant;

use crate::engine::render::{self, RenderModel};
use crate::engine::{LiveMetrics, Viewport};
use crate::session::clock::{Clock, SystemClock};
use crate::session::input::Key;
use crate::session::mode::TestConfig;
use crate::session::result::RunResult;

/// Elapsed time used when a run is force-ended before its first keystroke.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No target yet.
    Idle,
    /// Target set, clock not started.
    Armed,
    /// First character typed, clock running.
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Key(Key),
    Tick,
}

/// What a single event did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Unchanged,
    Updated,
    /// Escape: the caller should tear the run down without recording it.
    Abort,
    /// Tab: the caller should supply a fresh target via `start`.
    Regenerate,
    /// The run just completed. Produced at most once per run.
    Finished(RunResult),
}

pub struct TestSession<C: Clock = SystemClock> {
    config: TestConfig,
    target: Vec<char>,
    typed: Vec<char>,
    has_target: bool,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    finished: bool,
    clock: C,
}

impl<C: Clock> TestSession<C> {
    pub fn new(config: TestConfig, clock: C) -> Self {
        Self {
            config,
            target: Vec::new(),
            typed: Vec::new(),
            has_target: false,
            started_at: None,
            finished_at: None,
            finished: false,
            clock,
        }
    }

    pub fn with_target(config: TestConfig, clock: C, target: &str) -> Self {
        let mut session = Self::new(config, clock);
        session.start(target);
        session
    }

    /// Sets a new target and clears all per-run state. Also used for retry
    /// and for regeneration after Tab.
    pub fn start(&mut self, target: &str) {
        self.target = target.chars().collect();
        self.typed.clear();
        self.has_target = true;
        self.started_at = None;
        self.finished_at = None;
        self.finished = false;
        tracing::debug!(
            config = %self.config.label(),
            target_len = self.target.len(),
            "run armed"
        );
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.started_at.is_some() {
            Phase::Running
        } else if self.has_target {
            Phase::Armed
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::Key(key) => self.apply_key(key),
            SessionEvent::Tick => self.tick(),
        }
    }

    pub fn apply_key(&mut self, key: Key) -> Transition {
        if self.finished {
            return Transition::Unchanged;
        }

        let changed = match key {
            Key::Escape => return Transition::Abort,
            Key::Tab => return Transition::Regenerate,
            Key::Ignored => false,
            Key::Backspace => self.typed.pop().is_some(),
            Key::Char(ch) => self.type_char(ch),
        };

        if let Some(result) = self.check_completion() {
            return Transition::Finished(result);
        }
        if changed {
            Transition::Updated
        } else {
            Transition::Unchanged
        }
    }

    fn type_char(&mut self, ch: char) -> bool {
        if !self.has_target {
            return false;
        }
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
            tracing::debug!(config = %self.config.label(), "run started");
        }
        if self.typed.len() >= self.target.len() {
            return false;
        }
        self.typed.push(ch);
        if self.is_stream_exhausted() {
            tracing::warn!(
                target_len = self.target.len(),
                "timed word stream exhausted before the timer ran out"
            );
        }
        true
    }

    /// Clock wake-up. Only advances anything while running.
    pub fn tick(&mut self) -> Transition {
        match self.check_completion() {
            Some(result) => Transition::Finished(result),
            None => Transition::Unchanged,
        }
    }

    pub fn metrics(&self) -> LiveMetrics {
        self.metrics_at(self.clock.now())
    }

    /// Elapsed time freezes at the finishing instant.
    pub fn metrics_at(&self, now: Instant) -> LiveMetrics {
        LiveMetrics::compute(
            &self.typed,
            &self.target,
            self.elapsed_secs_at(now),
            self.config.duration_secs(),
        )
    }

    fn elapsed_secs_at(&self, now: Instant) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start).as_secs_f64(),
            (Some(start), None) => now.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Mode-specific end rule, evaluated only while running. Idempotent: a
    /// finished session never completes again.
    fn check_completion(&mut self) -> Option<RunResult> {
        if self.phase() != Phase::Running {
            return None;
        }
        let now = self.clock.now();
        let complete = match self.config {
            TestConfig::Sentence | TestConfig::WordsFixed { .. } => {
                self.typed.len() >= self.target.len()
            }
            TestConfig::WordsTimed { .. } => self
                .metrics_at(now)
                .remaining_secs
                .is_some_and(|remaining| remaining <= 0.0),
        };
        complete.then(|| self.finish(now))
    }

    /// Ends an armed or running run immediately.
    pub fn force_finish(&mut self) -> Option<RunResult> {
        match self.phase() {
            Phase::Armed | Phase::Running => {
                let now = self.clock.now();
                Some(self.finish(now))
            }
            Phase::Idle | Phase::Finished => None,
        }
    }

    fn finish(&mut self, now: Instant) -> RunResult {
        self.finished = true;
        self.finished_at = Some(now);
        let elapsed = match self.started_at {
            Some(start) => now
                .saturating_duration_since(start)
                .as_secs_f64()
                .max(MIN_ELAPSED_SECS),
            None => MIN_ELAPSED_SECS,
        };
        let result = RunResult::from_run(&self.config, &self.typed, &self.target, elapsed);
        tracing::info!(
            config = %self.config.label(),
            wpm = result.wpm,
            accuracy = result.accuracy,
            elapsed_secs = result.elapsed_secs,
            "run finished"
        );
        result
    }

    /// A timed run whose generated text has been typed out before time is up.
    /// Further characters are dropped until the timer ends the run.
    pub fn is_stream_exhausted(&self) -> bool {
        self.config.is_windowed()
            && !self.finished
            && !self.target.is_empty()
            && self.typed.len() >= self.target.len()
    }

    pub fn render(&self, viewport: Viewport) -> RenderModel {
        if self.config.is_windowed() {
            render::render_windowed(&self.target, &self.typed, viewport)
        } else {
            render::render_full(&self.target, &self.typed)
        }
    }
}
