//! Desktop engine: minifb window, keyboard polling, frame timer and the
//! game loop around the simulation.
//!
//! The framebuffer is the play area at native size (one pixel per sim unit);
//! the window scale option enlarges it.

pub mod canvas;
pub mod controls;

use std::time::Instant;

use anyhow::Result;
use minifb::{KeyRepeat, Scale, Window, WindowOptions};
use viberacing_common::AppConfig;
use viberacing_sim::{IntentSource, RaceEvent, Simulation};

use crate::hud;
use crate::render::SceneRenderer;
use canvas::Canvas;
use controls::{Controls, QUIT_KEY, RESET_KEY};

/// Only refresh the title every few frames; some platforms repaint the whole
/// decoration on each change
const TITLE_INTERVAL: u64 = 5;

fn window_scale(scale: u32) -> Scale {
    match scale {
        2 => Scale::X2,
        4 => Scale::X4,
        _ => Scale::X1,
    }
}

/// Run the game until the window closes or Esc is pressed
pub fn run(config: &AppConfig) -> Result<()> {
    let mut sim = Simulation::new(config.sim_config());
    let width = config.track.area_width as usize;
    let height = config.track.area_height as usize;

    let options = WindowOptions {
        scale: window_scale(config.window.scale),
        ..Default::default()
    };
    let mut window = Window::new(&config.window.title, width, height, options)
        .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
    window.set_target_fps(config.window.target_fps as usize);

    let controls = Controls::default();
    let mut renderer = SceneRenderer::new(&sim, width, height);
    let mut framebuffer = Canvas::new(width, height);
    let mut frame_count: u64 = 0;
    let mut laps_logged: u32 = 0;

    tracing::info!(
        "Engine initialized: {}x{} at {} fps (scale x{})",
        width, height, config.window.target_fps, config.window.scale
    );
    tracing::info!("Controls: WASD=Blue | Arrows=Yellow | R=Reset | Esc=Quit");

    let mut last_frame = Instant::now();
    while window.is_open() && !window.is_key_down(QUIT_KEY) {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        if window.is_key_pressed(RESET_KEY, KeyRepeat::No) {
            sim.reset();
        }

        let input = controls.poll(&window).snapshot();
        let report = sim.step(dt, &input);
        for event in &report.events {
            if let RaceEvent::LapCompleted { .. } = event {
                laps_logged += 1;
            }
        }
        tracing::trace!(
            "Frame {}: dt={:.4}s phase={:?} events={}",
            frame_count, dt, report.phase, report.events.len()
        );

        let snapshot = sim.snapshot();
        renderer.advance(dt);
        renderer.draw(&mut framebuffer, &snapshot);

        frame_count += 1;
        if frame_count % TITLE_INTERVAL == 0 {
            window.set_title(&hud::window_title(&config.window.title, &snapshot));
        }

        window
            .update_with_buffer(framebuffer.pixels(), width, height)
            .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
    }

    tracing::info!(
        "Engine shutdown after {} frames, {} laps completed",
        frame_count, laps_logged
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_option_maps_to_minifb() {
        assert!(matches!(window_scale(1), Scale::X1));
        assert!(matches!(window_scale(2), Scale::X2));
        assert!(matches!(window_scale(4), Scale::X4));
        assert!(matches!(window_scale(3), Scale::X1));
    }

    #[test]
    fn a_frame_renders_without_a_window() {
        let mut sim = Simulation::default();
        sim.step(1.0 / 60.0, &Default::default());
        let mut renderer = SceneRenderer::new(&sim, 900, 600);
        let mut fb = Canvas::new(900, 600);
        renderer.advance(1.0 / 60.0);
        renderer.draw(&mut fb, &sim.snapshot());
        // Countdown digit at the center
        assert_eq!(fb.get(450 + 16, 300 + 20), Some(0xFFFFFFFF));
    }
}
