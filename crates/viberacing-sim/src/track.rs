//! Course geometry
//!
//! The centerline is a lemniscate around the play-area center:
//!   x = cx + Sx·sin(t)
//!   y = cy + Sy·sin(t)·cos(t),   t ∈ [0, 2π)
//!
//! Screen coordinates: y grows downward. The curve crosses itself at the
//! center (t = 0 and t = π). The finish line is a vertical segment through
//! the curve point at t = π/4, on the bottom-right lobe.

use std::f64::consts::{FRAC_PI_4, TAU};

use viberacing_common::{PhysicsConfig, TrackConfig};

// ---------------------------------------------------------------------------
// TrackGeometry
// ---------------------------------------------------------------------------

/// Immutable description of the drivable corridor
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGeometry {
    center: (f64, f64),
    scale_x: f64,
    scale_y: f64,
    half_width: f64,
    samples: usize,
}

impl TrackGeometry {
    pub fn new(cfg: &TrackConfig) -> Self {
        Self {
            center: (cfg.area_width / 2.0, cfg.area_height / 2.0),
            scale_x: cfg.loop_offset + cfg.loop_radius * 0.7,
            scale_y: cfg.loop_radius * 2.0,
            half_width: cfg.track_width / 2.0,
            samples: cfg.distance_samples.max(1),
        }
    }

    /// Course center, which is also the self-crossing point
    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Horizontal and vertical curve extents (Sx, Sy)
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    pub fn point_on_curve(&self, t: f64) -> (f64, f64) {
        let (cx, cy) = self.center;
        (
            cx + self.scale_x * t.sin(),
            cy + self.scale_y * t.sin() * t.cos(),
        )
    }

    /// Evenly spaced curve points from `t_start` to `t_end` inclusive
    pub fn points_between(&self, t_start: f64, t_end: f64, segments: usize) -> Vec<(f64, f64)> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                let t = t_start + (t_end - t_start) * i as f64 / segments as f64;
                self.point_on_curve(t)
            })
            .collect()
    }

    /// Minimum distance from (x, y) to the centerline.
    ///
    /// Sampled at `distance_samples` parameter steps, not projected, so the
    /// result overestimates by at most half the gap between samples.
    pub fn distance_to_curve(&self, x: f64, y: f64) -> f64 {
        (0..self.samples)
            .map(|i| {
                let t = TAU * i as f64 / self.samples as f64;
                let (px, py) = self.point_on_curve(t);
                (x - px).hypot(y - py)
            })
            .fold(f64::INFINITY, f64::min)
    }

    pub fn is_on_track(&self, x: f64, y: f64) -> bool {
        self.distance_to_curve(x, y) <= self.half_width
    }

    /// True when (x, y) lies inside the axis-aligned box of half-size `radius`
    /// around the self-crossing
    pub fn is_near_crossing(&self, x: f64, y: f64, radius: f64) -> bool {
        let (cx, cy) = self.center;
        (x - cx).abs() < radius && (y - cy).abs() < radius
    }

    pub fn finish_line(&self) -> FinishLine {
        let (cx, cy) = self.center;
        let x = cx + self.scale_x * FRAC_PI_4.sin();
        let y = cy + self.scale_y * 0.5;
        FinishLine {
            x,
            y0: y - self.half_width,
            y1: y + self.half_width,
        }
    }

    /// Point behind the finish line that both grid slots are offset from
    pub fn grid_anchor(&self, back_offset: f64) -> (f64, f64) {
        let finish = self.finish_line();
        (finish.x - back_offset, finish.mid_y())
    }
}

// ---------------------------------------------------------------------------
// FinishLine
// ---------------------------------------------------------------------------

/// Vertical segment at `x` spanning `[y0, y1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishLine {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

impl FinishLine {
    pub fn mid_y(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// The y at which the move `prev → cur` crosses `x`, for strictly
    /// rightward crossings only (`prev.x <= x < cur.x`).
    pub fn crossing_y(&self, prev: (f64, f64), cur: (f64, f64)) -> Option<f64> {
        let (x0, y0) = prev;
        let (x1, y1) = cur;
        if !(x0 <= self.x && self.x < x1) {
            return None;
        }
        // x0 < x1 holds here, so the division is safe
        let t = (self.x - x0) / (x1 - x0);
        Some(y0 + t * (y1 - y0))
    }

    /// Rightward crossing whose interpolated y lands on the segment
    pub fn is_crossed_by(&self, prev: (f64, f64), cur: (f64, f64)) -> bool {
        self.crossing_y(prev, cur)
            .map_or(false, |y| self.y0 <= y && y <= self.y1)
    }
}

// ---------------------------------------------------------------------------
// PlayArea
// ---------------------------------------------------------------------------

/// Hard rectangular bound that keeps cars on screen. Off-track handling is
/// friction's job; this is only the outer safety net.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlayArea {
    /// Screen rectangle inset by one car width on every side
    pub fn new(track: &TrackConfig, physics: &PhysicsConfig) -> Self {
        let inset = physics.car_width;
        Self {
            min_x: inset,
            min_y: inset,
            max_x: track.area_width - inset,
            max_y: track.area_height - inset,
        }
    }

    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}
