//! Race start sequence: countdown → flag wave → active
//!
//! Phases follow elapsed time since the sequence was (re)started:
//!
//!   [0, countdown)                 Countdown: cars frozen
//!   [countdown, countdown + flag)  FlagWave: cars live, flag shown
//!   [countdown + flag, ∞)          Active: cars live
//!
//! Transitions run one way. Only `reset` goes back to Countdown.

use viberacing_common::RaceTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RacePhase {
    Countdown,
    FlagWave,
    Active,
}

impl RacePhase {
    /// The phase for a given time since the sequence started
    pub fn at(elapsed: f64, timing: &RaceTiming) -> Self {
        if elapsed < timing.countdown_seconds {
            RacePhase::Countdown
        } else if elapsed < timing.countdown_seconds + timing.flag_seconds {
            RacePhase::FlagWave
        } else {
            RacePhase::Active
        }
    }

    /// Whether cars consume intents in this phase
    pub fn motion_enabled(self) -> bool {
        !matches!(self, RacePhase::Countdown)
    }

    pub fn shows_flag(self) -> bool {
        matches!(self, RacePhase::FlagWave)
    }
}

/// Edge crossed during one `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    /// Countdown ended, cars are live
    GreenFlag,
    /// Flag wave ended
    FlagCleared,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartSequence {
    started_at: f64,
    elapsed: f64,
    phase: RacePhase,
}

impl StartSequence {
    pub fn new(now: f64) -> Self {
        Self {
            started_at: now,
            elapsed: 0.0,
            phase: RacePhase::Countdown,
        }
    }

    /// Back to Countdown, anchored at `now`
    pub fn reset(&mut self, now: f64) {
        *self = Self::new(now);
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Move to the phase for `now`, returning every edge crossed on the way.
    /// A single long step can cross both edges.
    pub fn advance(&mut self, now: f64, timing: &RaceTiming) -> Vec<PhaseTransition> {
        self.elapsed = (now - self.started_at).max(self.elapsed);
        let next = RacePhase::at(self.elapsed, timing).max(self.phase);

        let mut crossed = Vec::new();
        if self.phase == RacePhase::Countdown && next != RacePhase::Countdown {
            crossed.push(PhaseTransition::GreenFlag);
        }
        if self.phase != RacePhase::Active && next == RacePhase::Active {
            crossed.push(PhaseTransition::FlagCleared);
        }
        self.phase = next;
        crossed
    }

    /// Whole seconds left on the countdown display (5, 4, 3, 2, 1)
    pub fn countdown_remaining(&self, timing: &RaceTiming) -> Option<u32> {
        if self.phase != RacePhase::Countdown {
            return None;
        }
        let left = (timing.countdown_seconds - self.elapsed.floor()).ceil().max(1.0);
        Some(left as u32)
    }

    /// Seconds since the flag went up, for animating it
    pub fn flag_phase_time(&self, timing: &RaceTiming) -> Option<f64> {
        self.phase
            .shows_flag()
            .then(|| self.elapsed - timing.countdown_seconds)
    }
}
