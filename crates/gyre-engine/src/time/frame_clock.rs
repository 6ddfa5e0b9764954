use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock started. Monotonic, non-negative, not
    /// clamped; this is the rotation-angle driver.
    pub elapsed: f32,

    /// Seconds since the previous tick, clamped (see `FrameClock`).
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the process is
/// paused by a debugger, minimized, or stalls; elapsed time is reported
/// raw so animation stays continuous with wall time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock starting now, with a 250 ms delta clamp.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Restarts the clock; elapsed time resets to zero.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last = now;
        self.frame_index = 0;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.elapsed >= a.elapsed);
        assert!(a.elapsed >= 0.0);
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn reset_restarts_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.reset();
        let ft = clock.tick();
        assert_eq!(ft.frame_index, 0);
        assert!(ft.elapsed < 0.25, "elapsed after reset: {}", ft.elapsed);
    }

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick();
        let ft = clock.tick();
        assert!(ft.dt <= 0.25 + f32::EPSILON);
    }
}
