//! Top-down open-wheel car sprite, built from four polygons in car-local
//! coordinates (+x forward) and rotated into place every frame

use viberacing_sim::{CarView, PlayerSlot};

use crate::engine::canvas::{rgb, Canvas};

/// Fill, outline and wing colors for one livery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Livery {
    pub fill: u32,
    pub outline: u32,
    pub wing: u32,
}

impl Livery {
    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::Blue => Self {
                fill: rgb(0x3b82f6),
                outline: rgb(0x0b1f4a),
                wing: rgb(0x1e3a8a),
            },
            PlayerSlot::Yellow => Self {
                fill: rgb(0xfacc15),
                outline: rgb(0x4a3b00),
                wing: rgb(0xa16207),
            },
        }
    }
}

/// Car outline scaled to the configured length and width
#[derive(Debug, Clone, PartialEq)]
pub struct CarShape {
    pub body: Vec<(f64, f64)>,
    pub nose: Vec<(f64, f64)>,
    pub rear_wing: Vec<(f64, f64)>,
    pub front_wing: Vec<(f64, f64)>,
}

impl CarShape {
    pub fn new(length: f64, width: f64) -> Self {
        let l = length / 2.0;
        let w = width / 2.0;
        let scale = |pts: &[(f64, f64)]| pts.iter().map(|&(x, y)| (x * l, y * w)).collect();

        Self {
            body: scale(&[
                (-0.8, -0.6),
                (0.2, -0.45),
                (0.6, -0.25),
                (0.85, 0.0),
                (0.6, 0.25),
                (0.2, 0.45),
                (-0.8, 0.6),
                (-1.0, 0.4),
                (-1.0, -0.4),
            ]),
            nose: scale(&[(0.6, -0.22), (1.15, 0.0), (0.6, 0.22)]),
            rear_wing: scale(&[(-1.2, -0.8), (-0.7, -0.8), (-0.7, 0.8), (-1.2, 0.8)]),
            front_wing: scale(&[(0.9, -0.65), (1.25, -0.65), (1.25, 0.65), (0.9, 0.65)]),
        }
    }
}

/// Rotate by `heading` and translate to `(x, y)`
pub fn place(points: &[(f64, f64)], x: f64, y: f64, heading: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = heading.sin_cos();
    points
        .iter()
        .map(|&(px, py)| (x + px * cos - py * sin, y + px * sin + py * cos))
        .collect()
}

pub fn draw_car(canvas: &mut Canvas, view: &CarView, shape: &CarShape) {
    let livery = Livery::for_slot(view.slot);
    let parts = [
        (&shape.body, livery.fill, 2.0),
        (&shape.nose, livery.fill, 2.0),
        (&shape.rear_wing, livery.wing, 1.0),
        (&shape.front_wing, livery.wing, 1.0),
    ];
    for (points, fill, outline_width) in parts {
        let placed = place(points, view.x, view.y, view.heading);
        canvas.fill_polygon(&placed, fill);
        canvas.stroke_polygon(&placed, outline_width, livery.outline);
    }
}
