//! Static course artwork and the animated crowd

use std::f64::consts::PI;

use viberacing_sim::Simulation;

use crate::engine::canvas::{rgb, Canvas};

// ---- Palette ----
const INFIELD: u32 = rgb(0x23402b);
const STAND_STRIP: u32 = rgb(0x20252b);
const STAND: u32 = rgb(0x3b434c);
const SEAT: u32 = rgb(0x4b5661);
const BANNER: u32 = rgb(0xd35f4d);
const ROAD: u32 = rgb(0x2a2f36);
const ROAD_EDGE: u32 = rgb(0x3a4048);
const BRIDGE_SHADOW: u32 = rgb(0x0d0f12);
const LANE_MARK: u32 = rgb(0xffffff);
const CHECKER_LIGHT: u32 = rgb(0xf2f2f2);
const CHECKER_DARK: u32 = rgb(0x1b1f24);
const GRID_BOX: u32 = rgb(0x5f6b75);
const CROWD: [u32; 3] = [rgb(0xf3a26b), rgb(0x7ad1ff), rgb(0xe8e4b3)];

// ---- Layout ----
/// Height of the grand-stand strips at the top and bottom edge
const STRIP_HEIGHT: f64 = 58.0;
const STAND_COUNT: usize = 6;
const STAND_PITCH: f64 = 140.0;
const STAND_WIDTH: f64 = 90.0;
const BANNER_COUNT: usize = 5;
const BANNER_PITCH: f64 = 170.0;
const CURVE_SEGMENTS: usize = 80;
const SHADOW_OFFSET: f64 = 6.0;
const DASH: f64 = 15.0;
const FINISH_BLOCK: f64 = 10.0;
const FINISH_HALF_THICKNESS: f64 = 6.0;
const GRID_BOX_SIZE: (f64, f64) = (28.0, 18.0);

/// Paint everything that never moves
pub fn draw_background(canvas: &mut Canvas, sim: &Simulation) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    let track = sim.track();
    let width = track.half_width() * 2.0;

    // Scenery
    canvas.clear(INFIELD);
    canvas.fill_rect(0.0, 0.0, w, STRIP_HEIGHT, STAND_STRIP);
    canvas.fill_rect(0.0, h - STRIP_HEIGHT, w, h, STAND_STRIP);
    for i in 0..STAND_COUNT {
        let x0 = 40.0 + i as f64 * STAND_PITCH;
        let x1 = x0 + STAND_WIDTH;
        canvas.fill_rect(x0, 6.0, x1, STRIP_HEIGHT - 6.0, STAND);
        for (row, inset) in [(16.0, 6.0), (26.0, 8.0), (36.0, 10.0)] {
            canvas.stroke_segment((x0 + inset, row), (x1 - inset, row), 2.0, SEAT);
        }
    }
    for i in 0..BANNER_COUNT {
        let x0 = 70.0 + i as f64 * BANNER_PITCH;
        canvas.fill_rect(x0, 36.0, x0 + 80.0, 52.0, BANNER);
    }

    // Underpass branch (bottom-right ↔ top-left, through the center at t = 0)
    let under = track.points_between(5.0 * PI / 4.0, 2.0 * PI + 3.0 * PI / 4.0, CURVE_SEGMENTS);
    canvas.stroke_polyline(&under, width + 4.0, ROAD_EDGE);
    canvas.stroke_polyline(&under, width, ROAD);

    // Shadow cast by the bridge onto the lower road
    let shadow: Vec<(f64, f64)> = [PI - 0.5, PI - 0.25, PI, PI + 0.25, PI + 0.5]
        .iter()
        .map(|&t| {
            let (x, y) = track.point_on_curve(t);
            (x + SHADOW_OFFSET, y + SHADOW_OFFSET)
        })
        .collect();
    canvas.stroke_polyline(&shadow, width + 10.0, BRIDGE_SHADOW);

    // Overpass branch (top-right ↔ bottom-left, through the center at t = π)
    let (over_start, over_end) = (3.0 * PI / 4.0 - 0.3, 5.0 * PI / 4.0 + 0.3);
    let over = track.points_between(over_start, over_end, CURVE_SEGMENTS);
    canvas.stroke_polyline(&over, width, ROAD);

    // Lane markings: the lower one stops short of the bridge deck
    let marks = [
        track.points_between(5.0 * PI / 4.0, 2.0 * PI - 0.12, 50),
        track.points_between(0.12, 3.0 * PI / 4.0, 50),
        track.points_between(over_start, over_end, 40),
    ];
    for mark in &marks {
        canvas.dashed_polyline(mark, DASH, DASH, 2.0, LANE_MARK);
    }

    // Finish line
    let finish = sim.finish_line();
    let mut y = finish.y0.floor();
    let mut block = 0;
    while y < finish.y1 {
        let color = if block % 2 == 0 { CHECKER_LIGHT } else { CHECKER_DARK };
        canvas.fill_rect(
            finish.x - FINISH_HALF_THICKNESS,
            y,
            finish.x + FINISH_HALF_THICKNESS,
            (y + FINISH_BLOCK).min(finish.y1),
            color,
        );
        y += FINISH_BLOCK;
        block += 1;
    }

    // Starting grid, staggered behind the line
    let (gx, gy) = sim.grid_anchor();
    let (bw, bh) = GRID_BOX_SIZE;
    for i in 0..2 {
        let cx = gx - i as f64 * 26.0;
        let cy = gy - 24.0 + i as f64 * 32.0;
        canvas.stroke_rect(cx - bw / 2.0, cy - bh / 2.0, cx + bw / 2.0, cy + bh / 2.0, 2.0, GRID_BOX);
    }
}

/// Spectators in the top stands, shuffling colors four times a second
#[derive(Debug, Clone, PartialEq)]
pub struct Crowd {
    seats: Vec<(f64, f64)>,
    timer: f64,
    phase: usize,
}

impl Default for Crowd {
    fn default() -> Self {
        Self::new()
    }
}

impl Crowd {
    const INTERVAL: f64 = 0.25;
    const SIZE: f64 = 4.0;

    pub fn new() -> Self {
        let mut seats = Vec::with_capacity(STAND_COUNT * 3 * 8);
        for i in 0..STAND_COUNT {
            let x0 = 40.0 + i as f64 * STAND_PITCH;
            for r in 0..3 {
                for c in 0..8 {
                    seats.push((x0 + 10.0 + c as f64 * 10.0, 12.0 + r as f64 * 10.0));
                }
            }
        }
        Self { seats, timer: 0.0, phase: 0 }
    }

    #[cfg(test)]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    #[cfg(test)]
    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn advance(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }
        self.timer += dt;
        if self.timer >= Self::INTERVAL {
            self.timer = 0.0;
            self.phase = (self.phase + 1) % 2;
        }
    }

    pub fn color(&self, seat: usize) -> u32 {
        CROWD[(seat + self.phase) % CROWD.len()]
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for (i, &(x, y)) in self.seats.iter().enumerate() {
            canvas.fill_rect(x, y, x + Self::SIZE, y + Self::SIZE, self.color(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered() -> (Simulation, Canvas) {
        let sim = Simulation::default();
        let mut canvas = Canvas::new(900, 600);
        draw_background(&mut canvas, &sim);
        (sim, canvas)
    }

    #[test]
    fn centerline_is_road_and_infield_is_grass() {
        let (sim, canvas) = rendered();
        // Off the underpass-lane markings
        let (x, y) = sim.track().point_on_curve(PI / 2.0 + 0.05);
        let px = canvas.get(x as i32 + 20, y as i32).expect("on screen");
        assert_eq!(px, ROAD);
        assert_eq!(canvas.get(450, 560), Some(STAND_STRIP));
        assert_eq!(canvas.get(450, 500), Some(INFIELD));
    }

    #[test]
    fn finish_strip_is_checkered() {
        let (sim, canvas) = rendered();
        let f = sim.finish_line();
        let x = f.x as i32;
        let first = canvas.get(x, f.y0 as i32 + 3).expect("on screen");
        let second = canvas.get(x, f.y0 as i32 + 13).expect("on screen");
        assert_eq!(first, CHECKER_LIGHT);
        assert_eq!(second, CHECKER_DARK);
    }

    #[test]
    fn bridge_deck_covers_the_crossing() {
        let (sim, canvas) = rendered();
        // Both roads overlap here and the shadow reaches it too; the deck
        // is painted last
        let (cx, cy) = sim.track().center();
        let px = canvas.get(cx as i32 + 20, cy as i32 + 20).expect("on screen");
        assert_eq!(px, ROAD);
    }

    #[test]
    fn crowd_cycles_every_quarter_second() {
        let mut crowd = Crowd::new();
        assert_eq!(crowd.seat_count(), 144);
        let before = crowd.color(0);
        crowd.advance(0.1);
        assert_eq!(crowd.phase(), 0);
        crowd.advance(0.2);
        assert_eq!(crowd.phase(), 1);
        assert_ne!(crowd.color(0), before);
        crowd.advance(0.3);
        assert_eq!(crowd.phase(), 0);
        crowd.advance(-1.0);
        crowd.advance(f64::NAN);
        assert_eq!(crowd.phase(), 0);
    }
}
