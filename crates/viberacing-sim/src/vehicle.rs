//! Per-car kinematic state and the integration step

use viberacing_common::PhysicsConfig;

use crate::input::{ControlIntents, PlayerSlot};
use crate::lap::LapTracker;
use crate::path_side::PathSide;
use crate::track::PlayArea;

/// One competitor
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub slot: PlayerSlot,
    /// Position (px, screen coordinates)
    pub x: f64,
    pub y: f64,
    /// Position at the start of the current step
    pub prev_x: f64,
    pub prev_y: f64,
    /// Heading in radians, 0 = +x, positive turns clockwise on screen
    pub heading: f64,
    /// Signed forward speed (negative = reverse), px/s
    pub speed: f64,
    pub lap: LapTracker,
    pub path: PathSide,
}

impl Vehicle {
    /// A car parked in its grid box, facing the finish line
    pub fn on_grid(slot: PlayerSlot, anchor: (f64, f64), now: f64) -> Self {
        let (dx, dy) = slot.grid_offset();
        let (x, y) = (anchor.0 + dx, anchor.1 + dy);
        Self {
            slot,
            x,
            y,
            prev_x: x,
            prev_y: y,
            heading: 0.0,
            speed: 0.0,
            lap: LapTracker::new(now),
            path: PathSide::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.slot.name()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn prev_position(&self) -> (f64, f64) {
        (self.prev_x, self.prev_y)
    }

    /// Remember where the car was before this step moves it
    pub fn begin_step(&mut self) {
        self.prev_x = self.x;
        self.prev_y = self.y;
    }

    /// Advance one frame under the given intents.
    ///
    /// `is_on_track` is evaluated at the new position; when it reports false
    /// the stronger off-track friction is applied for this frame. Returns
    /// whether the car ended the frame off track.
    pub fn integrate<F>(
        &mut self,
        intents: ControlIntents,
        dt: f64,
        physics: &PhysicsConfig,
        is_on_track: F,
    ) -> bool
    where
        F: Fn(f64, f64) -> bool,
    {
        self.speed += intents.throttle_axis() * physics.accel_rate * dt;
        self.heading += intents.steer_axis() * physics.turn_rate * dt;

        self.speed *= physics.friction;

        self.x += self.heading.cos() * self.speed * dt;
        self.y += self.heading.sin() * self.speed * dt;

        let off_track = !is_on_track(self.x, self.y);
        if off_track {
            self.speed *= physics.off_track_friction;
        }
        off_track
    }

    /// Race not live: the car sits still
    pub fn hold(&mut self) {
        self.speed = 0.0;
    }

    pub fn clamp_to(&mut self, area: &PlayArea) {
        let (x, y) = area.clamp(self.x, self.y);
        self.x = x;
        self.y = y;
    }
}
