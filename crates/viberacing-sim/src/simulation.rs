//! The owning aggregate: track, cars, start sequence and the session clock
//!
//! Per step:
//!   1. advance the start sequence (re-arming lap bookkeeping at green)
//!   2. per car: integrate + off-track friction + clamp + lap latch,
//!      or hold still while the countdown runs
//!   3. per car: update the over/under branch
//!   4. resolve car/car contacts once
//!
//! The session clock is the sum of all sanitised `dt` values, so the host's
//! scheduler is irrelevant and tests can drive the race with synthetic steps.

use viberacing_common::SimConfig;

use crate::collision;
use crate::input::{InputSnapshot, PlayerSlot};
use crate::path_side::CrossingZones;
use crate::race::{PhaseTransition, RacePhase, StartSequence};
use crate::track::{FinishLine, PlayArea, TrackGeometry};
use crate::vehicle::Vehicle;

// ---------------------------------------------------------------------------
// Step output
// ---------------------------------------------------------------------------

/// Something that happened during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaceEvent {
    GreenFlag,
    FlagCleared,
    LapCompleted {
        slot: PlayerSlot,
        lap: u32,
        duration: f64,
    },
    Collision {
        a: PlayerSlot,
        b: PlayerSlot,
        overlap: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Session clock after the step
    pub now: f64,
    pub phase: RacePhase,
    pub events: Vec<RaceEvent>,
}

/// What a renderer needs for one car
#[derive(Debug, Clone, PartialEq)]
pub struct CarView {
    pub slot: PlayerSlot,
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub speed: f64,
    pub visible: bool,
    pub off_track: bool,
    pub laps: u32,
    /// 0 until the race is live
    pub current_lap_time: f64,
    pub last_lap: Option<f64>,
}

/// Read-only picture of the world between steps
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    pub countdown: Option<u32>,
    pub flag_phase_time: Option<f64>,
    pub cars: Vec<CarView>,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    config: SimConfig,
    track: TrackGeometry,
    finish: FinishLine,
    area: PlayArea,
    zones: CrossingZones,
    grid_anchor: (f64, f64),
    start: StartSequence,
    cars: Vec<Vehicle>,
    now: f64,
    frame: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulation {
    /// Build a session at clock 0. `config` is expected to have passed
    /// [`SimConfig::validate`].
    pub fn new(config: SimConfig) -> Self {
        let track = TrackGeometry::new(&config.track);
        let finish = track.finish_line();
        let area = PlayArea::new(&config.track, &config.physics);
        let zones = CrossingZones::new(&config.track);
        let grid_anchor = track.grid_anchor(config.track.grid_back_offset);
        let cars = Self::grid(grid_anchor, 0.0);

        tracing::debug!(
            "Course: finish x={:.1} y=[{:.1}, {:.1}], grid anchor ({:.1}, {:.1})",
            finish.x, finish.y0, finish.y1, grid_anchor.0, grid_anchor.1
        );

        Self {
            config,
            track,
            finish,
            area,
            zones,
            grid_anchor,
            start: StartSequence::new(0.0),
            cars,
            now: 0.0,
            frame: 0,
        }
    }

    fn grid(anchor: (f64, f64), now: f64) -> Vec<Vehicle> {
        PlayerSlot::ALL
            .iter()
            .map(|&slot| Vehicle::on_grid(slot, anchor, now))
            .collect()
    }

    /// Advance the world by `dt` seconds. Negative or non-finite `dt` is
    /// treated as zero: the frame still runs, nothing moves.
    pub fn step(&mut self, dt: f64, input: &InputSnapshot) -> StepReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let input = *input;
        self.now += dt;
        self.frame += 1;
        let now = self.now;
        let mut events = Vec::new();

        for transition in self.start.advance(now, &self.config.race) {
            match transition {
                PhaseTransition::GreenFlag => {
                    for car in &mut self.cars {
                        car.lap.restart(now);
                    }
                    tracing::info!("Green flag at t={:.2}s", now);
                    events.push(RaceEvent::GreenFlag);
                }
                PhaseTransition::FlagCleared => {
                    tracing::debug!("Flag cleared at t={:.2}s", now);
                    events.push(RaceEvent::FlagCleared);
                }
            }
        }

        let live = self.start.phase().motion_enabled();
        let track = &self.track;
        for car in &mut self.cars {
            car.begin_step();

            if live {
                let off = car.integrate(input.get(car.slot), dt, &self.config.physics, |x, y| {
                    track.is_on_track(x, y)
                });
                if off {
                    tracing::trace!("{} off track at ({:.1}, {:.1})", car.name(), car.x, car.y);
                }
                car.clamp_to(&self.area);

                let (prev, cur) = (car.prev_position(), car.position());
                if let Some(done) = car.lap.update(prev, cur, now, dt, &self.finish, &self.config.race) {
                    tracing::info!("{} completed lap {} in {:.2}s", car.name(), done.lap, done.duration);
                    events.push(RaceEvent::LapCompleted {
                        slot: car.slot,
                        lap: done.lap,
                        duration: done.duration,
                    });
                }
            } else {
                car.hold();
            }

            car.path.update(car.x, car.y, track, &self.zones);
        }

        for contact in collision::resolve_all(&mut self.cars, &self.config.physics, &self.area) {
            let (a, b) = (self.cars[contact.a].slot, self.cars[contact.b].slot);
            tracing::debug!("Contact {} / {}: overlap {:.2}px", a.name(), b.name(), contact.overlap);
            events.push(RaceEvent::Collision { a, b, overlap: contact.overlap });
        }

        StepReport {
            now,
            phase: self.start.phase(),
            events,
        }
    }

    /// Put both cars back on the grid and restart the countdown from now.
    /// Calling it twice in a row is the same as calling it once.
    pub fn reset(&mut self) {
        self.start.reset(self.now);
        self.cars = Self::grid(self.grid_anchor, self.now);
        tracing::info!("Race reset at t={:.2}s", self.now);
    }

    // --- queries ---------------------------------------------------------

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    pub fn finish_line(&self) -> &FinishLine {
        &self.finish
    }

    pub fn play_area(&self) -> &PlayArea {
        &self.area
    }

    pub fn grid_anchor(&self) -> (f64, f64) {
        self.grid_anchor
    }

    /// Session clock in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Steps taken since construction
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn phase(&self) -> RacePhase {
        self.start.phase()
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.start.countdown_remaining(&self.config.race)
    }

    pub fn flag_phase_time(&self) -> Option<f64> {
        self.start.flag_phase_time(&self.config.race)
    }

    pub fn cars(&self) -> &[Vehicle] {
        &self.cars
    }

    pub fn car(&self, slot: PlayerSlot) -> &Vehicle {
        &self.cars[slot.index()]
    }

    /// Mutable access for hosts that place cars directly (replays, tests)
    pub fn car_mut(&mut self, slot: PlayerSlot) -> &mut Vehicle {
        &mut self.cars[slot.index()]
    }

    pub fn is_car_visible(&self, slot: PlayerSlot) -> bool {
        let car = self.car(slot);
        !car.path.is_hidden(car.x, car.y, &self.track, &self.zones)
    }

    pub fn is_car_off_track(&self, slot: PlayerSlot) -> bool {
        let car = self.car(slot);
        !self.track.is_on_track(car.x, car.y)
    }

    /// Time on the current lap, 0 while the countdown runs
    pub fn current_lap_time(&self, slot: PlayerSlot) -> f64 {
        if self.phase().motion_enabled() {
            self.car(slot).lap.current_lap_time(self.now)
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            phase: self.phase(),
            countdown: self.countdown_remaining(),
            flag_phase_time: self.flag_phase_time(),
            cars: self
                .cars
                .iter()
                .map(|car| CarView {
                    slot: car.slot,
                    name: car.name(),
                    x: car.x,
                    y: car.y,
                    heading: car.heading,
                    speed: car.speed,
                    visible: self.is_car_visible(car.slot),
                    off_track: self.is_car_off_track(car.slot),
                    laps: car.lap.laps(),
                    current_lap_time: self.current_lap_time(car.slot),
                    last_lap: car.lap.last_lap(),
                })
                .collect(),
        }
    }
}
