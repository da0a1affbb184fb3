//! Lap counting
//!
//! A lap counts when a car crosses the finish line rightward inside the
//! segment, but only after it has been seen well right of the line and then
//! well left of it again. The two booleans form a latch:
//!
//!   seen_far_side: x > line + margin since the last lap
//!   lap_ready:     x < line - margin while seen_far_side was set
//!
//! On top of the latch, a cooldown and a minimum lap time keep jitter at the
//! line from double-counting.

use viberacing_common::RaceTiming;

use crate::track::FinishLine;

/// A lap that was just counted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedLap {
    /// Lap count after this lap (1 for the first)
    pub lap: u32,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LapTracker {
    laps: u32,
    lap_started_at: f64,
    last_lap: Option<f64>,
    seen_far_side: bool,
    lap_ready: bool,
    cooldown: f64,
}

impl LapTracker {
    pub fn new(now: f64) -> Self {
        Self {
            laps: 0,
            lap_started_at: now,
            last_lap: None,
            seen_far_side: false,
            lap_ready: false,
            cooldown: 0.0,
        }
    }

    /// Re-arm the bookkeeping at the green flag. The lap count is kept.
    pub fn restart(&mut self, now: f64) {
        self.lap_started_at = now;
        self.last_lap = None;
        self.cooldown = 0.0;
        self.seen_far_side = false;
        self.lap_ready = false;
    }

    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn last_lap(&self) -> Option<f64> {
        self.last_lap
    }

    pub fn lap_started_at(&self) -> f64 {
        self.lap_started_at
    }

    pub fn current_lap_time(&self, now: f64) -> f64 {
        (now - self.lap_started_at).max(0.0)
    }

    pub fn seen_far_side(&self) -> bool {
        self.seen_far_side
    }

    pub fn lap_ready(&self) -> bool {
        self.lap_ready
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    /// Advance the latch for a car that moved `prev → cur` during a step of
    /// length `dt` ending at `now`.
    pub fn update(
        &mut self,
        prev: (f64, f64),
        cur: (f64, f64),
        now: f64,
        dt: f64,
        finish: &FinishLine,
        timing: &RaceTiming,
    ) -> Option<CompletedLap> {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let x = cur.0;
        if x > finish.x + timing.crossing_margin {
            self.seen_far_side = true;
        }
        if x < finish.x - timing.crossing_margin && self.seen_far_side {
            self.lap_ready = true;
        }

        if !finish.is_crossed_by(prev, cur) {
            return None;
        }
        if !self.lap_ready {
            tracing::trace!("Finish crossing ignored: latch not armed");
            return None;
        }
        if self.cooldown > 0.0 {
            tracing::debug!("Finish crossing ignored: cooldown {:.2}s left", self.cooldown);
            return None;
        }

        let duration = now - self.lap_started_at;
        if duration <= timing.min_lap_seconds {
            tracing::debug!("Finish crossing ignored: lap of {:.2}s is implausibly short", duration);
            return None;
        }

        self.laps += 1;
        self.last_lap = Some(duration);
        self.lap_started_at = now;
        self.cooldown = timing.lap_cooldown_seconds;
        self.seen_far_side = false;
        self.lap_ready = false;

        Some(CompletedLap { lap: self.laps, duration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.05;

    fn finish() -> FinishLine {
        FinishLine { x: 600.0, y0: 425.0, y1: 515.0 }
    }

    /// Drives the tracker through a list of x positions at y = 470, one step each
    fn drive(lap: &mut LapTracker, start_x: f64, xs: &[f64], t0: f64) -> (f64, Vec<CompletedLap>) {
        let timing = RaceTiming::default();
        let f = finish();
        let mut prev = (start_x, 470.0);
        let mut now = t0;
        let mut laps = Vec::new();
        for &x in xs {
            now += DT;
            let cur = (x, 470.0);
            if let Some(done) = lap.update(prev, cur, now, DT, &f, &timing) {
                laps.push(done);
            }
            prev = cur;
        }
        (now, laps)
    }

    #[test]
    fn jitter_across_the_line_never_counts() {
        let mut lap = LapTracker::new(0.0);
        let mut xs = Vec::new();
        for _ in 0..100 {
            xs.push(601.0);
            xs.push(599.0);
        }
        let (_, laps) = drive(&mut lap, 599.0, &xs, 0.0);
        assert!(laps.is_empty());
        assert_eq!(lap.laps(), 0);
        assert!(!lap.seen_far_side());
    }

    #[test]
    fn full_loop_counts_once() {
        let mut lap = LapTracker::new(0.0);
        // Start left of the line, cross without being armed, go far right,
        // come back far left, then cross again.
        let mut xs: Vec<f64> = (0..20).map(|i| 590.0 + i as f64 * 5.0).collect();
        xs.extend((0..40).map(|i| 680.0 - i as f64 * 5.0));
        xs.extend((0..5).map(|i| 585.0 + i as f64 * 5.0));
        let (_, laps) = drive(&mut lap, 585.0, &xs, 0.0);
        assert_eq!(laps.len(), 1, "laps: {:?}", laps);
        assert_eq!(laps[0].lap, 1);
        assert_eq!(lap.laps(), 1);
        assert!(lap.last_lap().is_some());
        assert!(!lap.lap_ready() && !lap.seen_far_side());
        assert!(lap.cooldown() > 0.0);
    }

    #[test]
    fn lap_shorter_than_minimum_is_rejected() {
        let timing = RaceTiming::default();
        let f = finish();
        let mut lap = LapTracker::new(0.0);
        // Arm the latch within a few hundredths of a second
        lap.update((600.0, 470.0), (620.0, 470.0), 0.1, 0.1, &f, &timing);
        lap.update((620.0, 470.0), (580.0, 470.0), 0.2, 0.1, &f, &timing);
        assert!(lap.lap_ready());
        // Valid crossing, but only 0.3s after the lap started
        let done = lap.update((590.0, 470.0), (605.0, 470.0), 0.3, 0.1, &f, &timing);
        assert!(done.is_none());
        assert_eq!(lap.laps(), 0);
        // Latch stays armed, so the next crossing after 0.6s counts
        let done = lap.update((590.0, 470.0), (605.0, 470.0), 0.9, 0.1, &f, &timing);
        assert_eq!(done.map(|d| d.lap), Some(1));
    }

    #[test]
    fn cooldown_blocks_immediate_second_lap() {
        let timing = RaceTiming::default();
        let f = finish();
        let mut lap = LapTracker::new(0.0);
        lap.seen_far_side = true;
        lap.lap_ready = true;
        assert!(lap.update((595.0, 470.0), (605.0, 470.0), 1.0, 0.05, &f, &timing).is_some());

        // Re-armed by hand, 0.7s later: long enough lap, but still cooling down
        lap.seen_far_side = true;
        lap.lap_ready = true;
        assert!(lap.update((595.0, 470.0), (605.0, 470.0), 1.7, 0.7, &f, &timing).is_none());
        assert!(lap.cooldown() > 0.0);
        assert_eq!(lap.laps(), 1);
    }

    #[test]
    fn cooldown_decays_to_zero_and_stays() {
        let timing = RaceTiming::default();
        let f = finish();
        let mut lap = LapTracker::new(0.0);
        lap.cooldown = 0.5;
        let mut prev = lap.cooldown();
        for i in 1..=20 {
            lap.update((100.0, 100.0), (100.0, 100.0), i as f64 * 0.1, 0.1, &f, &timing);
            assert!(lap.cooldown() <= prev);
            assert!(lap.cooldown() >= 0.0);
            prev = lap.cooldown();
        }
        assert_eq!(lap.cooldown(), 0.0);
    }

    #[test]
    fn crossing_outside_segment_is_ignored() {
        let timing = RaceTiming::default();
        let f = finish();
        let mut lap = LapTracker::new(0.0);
        lap.seen_far_side = true;
        lap.lap_ready = true;
        assert!(lap.update((595.0, 300.0), (605.0, 300.0), 2.0, 0.05, &f, &timing).is_none());
        assert!(lap.lap_ready());
    }

    #[test]
    fn restart_clears_bookkeeping_but_keeps_count() {
        let mut lap = LapTracker::new(0.0);
        lap.laps = 3;
        lap.last_lap = Some(12.0);
        lap.seen_far_side = true;
        lap.lap_ready = true;
        lap.cooldown = 1.0;
        lap.restart(5.0);
        assert_eq!(lap.laps(), 3);
        assert_eq!(lap.last_lap(), None);
        assert_eq!(lap.lap_started_at(), 5.0);
        assert!(!lap.seen_far_side() && !lap.lap_ready());
        assert_eq!(lap.cooldown(), 0.0);
        assert!((lap.current_lap_time(7.5) - 2.5).abs() < 1e-12);
    }
}
