use std::time::{Duration, Instant};

/// Longest step, in seconds, a single tick hands to playback.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Wall-clock source of `dt` for a preview tick loop.
///
/// Steps are capped at `max_dt`; after a stalled frame playback resumes
/// where it left off.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    max_dt: f32,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_dt(MAX_FRAME_DT)
    }

    /// A clock capping every step at `max_dt` seconds (negative values count as 0).
    #[must_use]
    pub fn with_max_dt(max_dt: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            max_dt: max_dt.max(0.0),
            frames: 0,
        }
    }

    /// Seconds since the previous tick, capped at `max_dt`.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit current time. A `now`
    /// earlier than the previous tick yields 0.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.frames += 1;
        elapsed.as_secs_f32().min(self.max_dt)
    }

    /// Number of ticks so far.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    #[must_use]
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}
