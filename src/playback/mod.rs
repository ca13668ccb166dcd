//! Playback controller for recorded traces
//!
//! A [`PlaybackController`] walks a cursor through a [`Trace`]. The cursor
//! counts the steps applied so far, so it ranges over `0..=len`. The
//! controller never sleeps or spawns anything: while running it hands the
//! host one pending [`Tick`] and the host calls [`PlaybackController::fire`]
//! once the tick's delay has elapsed.
//!
//! # Cancellation
//!
//! Every tick is stamped with the epoch that minted it. Leaving the running
//! mode (pause, stop, reset, load, a new play) bumps the epoch first, so a
//! tick the host fires late is recognised as stale and ignored.

use crate::projector::{project, ViewState};
use crate::trace::Trace;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, trace};

/// Base and minimum delay between two animation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    pub base: Duration,
    pub floor: Duration,
}

impl Pace {
    pub const fn from_millis(base_ms: u64, floor_ms: u64) -> Self {
        Pace {
            base: Duration::from_millis(base_ms),
            floor: Duration::from_millis(floor_ms),
        }
    }

    /// Delay between ticks at the given speed, never shorter than the floor
    pub fn delay(&self, speed: Speed) -> Duration {
        self.base.div_f64(speed.multiplier()).max(self.floor)
    }
}

impl Default for Pace {
    fn default() -> Self {
        Pace::from_millis(1000, 100)
    }
}

/// Playback speed multipliers offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    FiveQuarters,
    ThreeHalves,
    Double,
}

impl Speed {
    pub const ALL: [Speed; 7] = [
        Speed::Quarter,
        Speed::Half,
        Speed::ThreeQuarters,
        Speed::Normal,
        Speed::FiveQuarters,
        Speed::ThreeHalves,
        Speed::Double,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Speed::Quarter => 0.25,
            Speed::Half => 0.5,
            Speed::ThreeQuarters => 0.75,
            Speed::Normal => 1.0,
            Speed::FiveQuarters => 1.25,
            Speed::ThreeHalves => 1.5,
            Speed::Double => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Quarter => "0.25x",
            Speed::Half => "0.5x",
            Speed::ThreeQuarters => "0.75x",
            Speed::Normal => "1x",
            Speed::FiveQuarters => "1.25x",
            Speed::ThreeHalves => "1.5x",
            Speed::Double => "2x",
        }
    }

    /// Exact match against the offered multipliers
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| (s.multiplier() - multiplier).abs() < f64::EPSILON)
    }

    /// Next faster speed, saturating at the fastest
    pub fn faster(self) -> Self {
        let pos = self.position();
        Self::ALL[(pos + 1).min(Self::ALL.len() - 1)]
    }

    /// Next slower speed, saturating at the slowest
    pub fn slower(self) -> Self {
        Self::ALL[self.position().saturating_sub(1)]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(3)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Speed {
    type Err = String;

    /// Accepts `1.5x` as well as a bare `1.5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_end_matches(['x', 'X'])
            .parse::<f64>()
            .ok()
            .and_then(Speed::from_multiplier)
            .ok_or_else(|| {
                let labels: Vec<&str> = Speed::ALL.iter().map(|s| s.label()).collect();
                format!("unknown speed '{}' (expected one of: {})", s, labels.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Idle => "Idle",
            Mode::Running => "Running",
            Mode::Paused => "Paused",
            Mode::Finished => "Finished",
        };
        f.write_str(label)
    }
}

/// A scheduled advance handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    epoch: u64,
    serial: u64,
    delay: Duration,
}

impl Tick {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// What a fired tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One step applied; the next tick is pending
    Advanced,
    /// The last step was applied and playback stopped
    Finished,
    /// The tick was cancelled or superseded; nothing changed
    Stale,
}

/// Cursor state machine over one trace
#[derive(Debug, Clone)]
pub struct PlaybackController<T> {
    trace: Option<Trace<T>>,
    cursor: usize,
    mode: Mode,
    speed: Speed,
    pace: Pace,
    epoch: u64,
    serial: u64,
    pending: Option<Tick>,
}

impl<T> PlaybackController<T> {
    pub fn new(pace: Pace) -> Self {
        PlaybackController {
            trace: None,
            cursor: 0,
            mode: Mode::Idle,
            speed: Speed::default(),
            pace,
            epoch: 0,
            serial: 0,
            pending: None,
        }
    }

    /// Invalidate any outstanding tick
    fn cancel(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = None;
    }

    fn schedule(&mut self) -> Tick {
        self.serial = self.serial.wrapping_add(1);
        let tick = Tick {
            epoch: self.epoch,
            serial: self.serial,
            delay: self.pace.delay(self.speed),
        };
        self.pending = Some(tick);
        tick
    }

    /// Mode for a cursor outside of running playback
    fn settle_mode(&self) -> Mode {
        if self.cursor >= self.len() {
            Mode::Finished
        } else {
            Mode::Paused
        }
    }

    /// Replace the current trace and park at its start
    pub fn load(&mut self, trace: Trace<T>) {
        self.cancel();
        debug!(steps = trace.len(), "loaded trace");
        self.trace = Some(trace);
        self.cursor = 0;
        self.mode = self.settle_mode();
    }

    /// Discard the trace and return to idle
    pub fn reset(&mut self) {
        self.cancel();
        self.trace = None;
        self.cursor = 0;
        self.mode = Mode::Idle;
        debug!("playback reset");
    }

    /// Start or resume automatic advancing.
    ///
    /// Returns the first tick to schedule, or `None` when nothing changed
    /// (no trace loaded, or already running).
    pub fn play(&mut self) -> Option<Tick> {
        match self.mode {
            Mode::Idle | Mode::Running => None,
            Mode::Paused | Mode::Finished => {
                self.cancel();
                if self.mode == Mode::Finished {
                    self.cursor = 0;
                }
                if self.cursor >= self.len() {
                    self.mode = Mode::Finished;
                    return None;
                }
                self.mode = Mode::Running;
                let tick = self.schedule();
                debug!(cursor = self.cursor, epoch = tick.epoch, "playback started");
                Some(tick)
            }
        }
    }

    pub fn pause(&mut self) {
        if self.mode == Mode::Running {
            self.cancel();
            self.mode = Mode::Paused;
            debug!(cursor = self.cursor, "playback paused");
        }
    }

    /// Halt playback without moving the cursor
    pub fn stop(&mut self) {
        if self.mode == Mode::Idle {
            return;
        }
        self.cancel();
        self.mode = self.settle_mode();
        debug!(cursor = self.cursor, mode = %self.mode, "playback stopped");
    }

    pub fn step_forward(&mut self) {
        if matches!(self.mode, Mode::Paused) {
            self.seek(self.cursor + 1);
        }
    }

    pub fn step_backward(&mut self) {
        if matches!(self.mode, Mode::Paused | Mode::Finished) {
            self.seek(self.cursor.saturating_sub(1));
        }
    }

    /// Jump the cursor to `position`, clamped to the trace
    pub fn seek(&mut self, position: usize) {
        if matches!(self.mode, Mode::Idle | Mode::Running) {
            return;
        }
        self.cursor = position.min(self.len());
        self.mode = self.settle_mode();
        trace!(cursor = self.cursor, mode = %self.mode, "seek");
    }

    /// Applies from the next scheduled tick; a pending tick keeps its delay
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Apply one step if `tick` is still the live one
    pub fn fire(&mut self, tick: Tick) -> TickOutcome {
        if self.mode != Mode::Running || self.pending != Some(tick) || tick.epoch != self.epoch {
            trace!(
                epoch = tick.epoch,
                serial = tick.serial,
                current = self.epoch,
                "discarding stale tick"
            );
            return TickOutcome::Stale;
        }
        self.cursor = (self.cursor + 1).min(self.len());
        if self.cursor >= self.len() {
            self.cancel();
            self.mode = Mode::Finished;
            debug!(cursor = self.cursor, "playback finished");
            TickOutcome::Finished
        } else {
            let next = self.schedule();
            trace!(cursor = self.cursor, serial = next.serial, "advanced");
            TickOutcome::Advanced
        }
    }

    pub fn pending(&self) -> Option<Tick> {
        self.pending
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn trace(&self) -> Option<&Trace<T>> {
        self.trace.as_ref()
    }

    /// Number of steps in the loaded trace, zero when idle
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> PlaybackController<T> {
    /// Project the loaded trace at the current cursor
    pub fn view(&self) -> Option<ViewState<T>> {
        self.trace.as_ref().map(|trace| project(trace, self.cursor))
    }
}
