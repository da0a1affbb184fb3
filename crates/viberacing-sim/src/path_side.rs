//! Over/under branch tracking at the self-crossing
//!
//! OVERPASS:  top-right ↔ bottom-left quadrants (passes the center at t = π)
//! UNDERPASS: top-left ↔ bottom-right quadrants (passes the center at t = 0)
//!
//! The quadrant tells which branch a car is on everywhere except at the
//! crossing itself, so the last classification is held while the car is
//! inside the lock box.

use viberacing_common::TrackConfig;

use crate::track::TrackGeometry;

/// Half-sizes of the two boxes around the crossing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingZones {
    /// Branch assignment is frozen inside this box
    pub lock_radius: f64,
    /// Underpass cars are hidden inside this box
    pub hide_radius: f64,
}

impl CrossingZones {
    pub fn new(cfg: &TrackConfig) -> Self {
        Self {
            lock_radius: cfg.track_width * cfg.path_lock_factor,
            hide_radius: cfg.track_width * cfg.hide_factor,
        }
    }
}

/// Overpass quadrants are (right, top) and (left, bottom). y grows downward.
pub fn quadrant_is_overpass(x: f64, y: f64, center: (f64, f64)) -> bool {
    let in_right = x > center.0;
    let in_top = y < center.1;
    in_right == in_top
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSide {
    on_overpass: bool,
}

impl Default for PathSide {
    fn default() -> Self {
        Self { on_overpass: true }
    }
}

impl PathSide {
    pub fn on_overpass(&self) -> bool {
        self.on_overpass
    }

    pub fn update(&mut self, x: f64, y: f64, track: &TrackGeometry, zones: &CrossingZones) {
        if track.is_near_crossing(x, y, zones.lock_radius) {
            return;
        }
        self.on_overpass = quadrant_is_overpass(x, y, track.center());
    }

    /// Whether a car at (x, y) on this branch is drawn under the bridge
    pub fn is_hidden(&self, x: f64, y: f64, track: &TrackGeometry, zones: &CrossingZones) -> bool {
        !self.on_overpass && track.is_near_crossing(x, y, zones.hide_radius)
    }
}
