use std::time::{Duration, Instant};

use crate::foundation::error::{FieldError, FieldResult};

/// Default display cadence.
pub const DEFAULT_FRAME_RATE_HZ: f64 = 60.0;

/// Paces a [`crate::FrameLoop`].
///
/// `wait_frame` is called once after every presented frame; `sleep` is used for the fixed
/// back-off while a surface is not laid out yet.
pub trait FrameClock {
    /// Block until the next display frame is due.
    fn wait_frame(&mut self);

    /// Block for `d`, independent of the frame cadence.
    fn sleep(&mut self, d: Duration);
}

/// Wall-clock pacing at a fixed frame interval.
///
/// Each `wait_frame` sleeps for the remainder of the current interval. A frame that overran its
/// interval does not queue catch-up frames; the schedule restarts from now.
#[derive(Debug)]
pub struct IntervalClock {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalClock {
    /// Clock ticking every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Clock ticking `hz` times per second.
    pub fn with_rate(hz: f64) -> FieldResult<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(FieldError::validation(format!(
                "frame rate must be positive, got {hz}"
            )));
        }
        Ok(Self::new(Duration::from_secs_f64(1.0 / hz)))
    }

    /// Frame interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE_HZ))
    }
}

impl FrameClock for IntervalClock {
    fn wait_frame(&mut self) {
        let now = Instant::now();
        let due = self.next_due.unwrap_or(now) + self.interval;
        if due > now {
            std::thread::sleep(due - now);
            self.next_due = Some(due);
        } else {
            self.next_due = Some(now);
        }
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
        self.next_due = None;
    }
}

/// Virtual clock that never blocks. Time only advances by what the loop asks for.
#[derive(Clone, Debug)]
pub struct ManualClock {
    interval: Duration,
    elapsed: Duration,
    frames: u64,
    sleeps: u64,
}

impl ManualClock {
    /// Virtual clock advancing by `interval` per frame.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            frames: 0,
            sleeps: 0,
        }
    }

    /// Total virtual time waited so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of `wait_frame` calls.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of `sleep` calls.
    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE_HZ))
    }
}

impl FrameClock for ManualClock {
    fn wait_frame(&mut self) {
        self.frames += 1;
        self.elapsed += self.interval;
    }

    fn sleep(&mut self, d: Duration) {
        self.sleeps += 1;
        self.elapsed += d;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;
