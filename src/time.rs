//! Fixed-interval clock using an accumulator.
//!
//! `draw_web()` calls at ~60fps with variable delta. `GameTime` turns that
//! into a whole number of elapsed intervals per frame, so the passive tick
//! and the periodic save follow wall-clock time and are testable without a
//! browser.

/// Longest frame delta the animation clock honours. A fade resumes where
/// it left off instead of jumping to the end.
pub const MAX_FRAME_DELTA_MS: f64 = 500.0;

/// Longest gap a wall-clock timer catches up on. Hidden tabs get no frames,
/// so the first frame back carries the whole gap.
pub const MAX_CATCH_UP_MS: f64 = 86_400_000.0;

pub struct GameTime {
    interval_ms: f64,
    max_delta_ms: f64,
    /// Milliseconds not yet consumed as whole intervals.
    accumulator: f64,
    /// None until the first frame.
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// A clock that fires once every `interval_ms` milliseconds of wall-clock
    /// time, catching up on gaps up to [`MAX_CATCH_UP_MS`].
    pub fn every(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            max_delta_ms: MAX_CATCH_UP_MS,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Count at most `max_delta_ms` of any single gap between frames.
    pub fn max_delta(mut self, max_delta_ms: f64) -> Self {
        self.max_delta_ms = max_delta_ms.max(0.0);
        self
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Feed a wall-clock timestamp (`performance.now()`). Returns how many
    /// intervals elapsed since the previous call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let fired = (self.accumulator / self.interval_ms) as u32;
        self.accumulator -= fired as f64 * self.interval_ms;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_fires_nothing() {
        let mut clock = GameTime::every(1_000);
        assert_eq!(clock.update(12_345.0), 0);
    }

    #[test]
    fn one_tick_per_second() {
        let mut clock = GameTime::every(1_000);
        clock.update(0.0);
        let mut fired = 0;
        for i in 1..=10 {
            fired += clock.update(i as f64 * 500.0);
        }
        assert_eq!(fired, 5);
    }

    #[test]
    fn remainder_carried_over() {
        let mut clock = GameTime::every(100);
        clock.update(0.0);
        assert_eq!(clock.update(150.0), 1);
        assert_eq!(clock.update(200.0), 1);
    }

    #[test]
    fn hidden_tab_catches_up() {
        let mut clock = GameTime::every(1_000);
        clock.update(0.0);
        // No frames for a minute, then one frame.
        assert_eq!(clock.update(60_000.0), 60);
        assert_eq!(clock.update(61_000.0), 1);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut clock = GameTime::every(1_000);
        clock.update(0.0);
        assert_eq!(clock.update(3.0 * MAX_CATCH_UP_MS), 86_400);
    }

    #[test]
    fn animation_clock_clamps_large_delta() {
        let mut clock = GameTime::every(100).max_delta(MAX_FRAME_DELTA_MS);
        clock.update(0.0);
        // Tab hidden for 10 s: only 500 ms count.
        assert_eq!(clock.update(10_000.0), 5);
        assert_eq!(clock.update(10_100.0), 1);
    }

    #[test]
    fn backwards_timestamp_counts_as_zero() {
        let mut clock = GameTime::every(100);
        clock.update(1_000.0);
        assert_eq!(clock.update(900.0), 0);
        assert_eq!(clock.update(1_000.0), 1);
    }

    #[test]
    fn save_interval_at_60fps() {
        let mut clock = GameTime::every(5_000);
        clock.update(0.0);
        let mut fired = 0u32;
        // 12 seconds of ~16.67 ms frames.
        for i in 1..=720 {
            fired += clock.update(i as f64 * 16.667);
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn zero_interval_is_treated_as_one_ms() {
        let clock = GameTime::every(0);
        assert_eq!(clock.interval_ms(), 1.0);
    }
}
