//! Scene drawing on top of the canvas primitives
//!
//!   track  : static background (stands, infield, figure-eight, grid) + crowd
//!   car    : rotated body / nose / wing polygons per car
//!   overlay: countdown digit and the waving checkered flag

pub mod car;
pub mod overlay;
pub mod track;

use viberacing_common::PhysicsConfig;
use viberacing_sim::{RaceSnapshot, Simulation};

use crate::engine::canvas::Canvas;

pub use car::CarShape;
pub use track::Crowd;

/// Everything needed to paint one frame
pub struct SceneRenderer {
    background: Canvas,
    crowd: Crowd,
    shape: CarShape,
}

impl SceneRenderer {
    /// Pre-render the static course for this simulation
    pub fn new(sim: &Simulation, width: usize, height: usize) -> Self {
        let mut background = Canvas::new(width, height);
        track::draw_background(&mut background, sim);
        let physics: &PhysicsConfig = &sim.config().physics;
        Self {
            background,
            crowd: Crowd::new(),
            shape: CarShape::new(physics.car_length, physics.car_width),
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.crowd.advance(dt);
    }

    pub fn draw(&self, canvas: &mut Canvas, snapshot: &RaceSnapshot) {
        canvas.copy_from(&self.background);
        self.crowd.draw(canvas);
        for view in snapshot.cars.iter().filter(|v| v.visible) {
            car::draw_car(canvas, view, &self.shape);
        }
        overlay::draw_start_overlay(canvas, snapshot);
    }
}
