//! Start-sequence overlay: big countdown digit, then the waving flag

use viberacing_sim::RaceSnapshot;

use crate::engine::canvas::{rgb, Canvas};

const DIGIT_COLOR: u32 = rgb(0xffffff);
const FLAG_LIGHT: u32 = rgb(0xffffff);
const FLAG_DARK: u32 = rgb(0x1b1f24);
const FLAG_POLE: u32 = rgb(0xcfd4da);

const DIGIT_HEIGHT: f64 = 72.0;
const DIGIT_WIDTH: f64 = 40.0;
const SEGMENT_THICKNESS: f64 = 9.0;

const FLAG_SIZE: (f64, f64) = (120.0, 80.0);
const FLAG_BLOCK: f64 = 20.0;
/// Flag frames per second
const WAVE_RATE: f64 = 6.0;

pub fn draw_start_overlay(canvas: &mut Canvas, snapshot: &RaceSnapshot) {
    let center = (canvas.width() as f64 / 2.0, canvas.height() as f64 / 2.0);
    if let Some(n) = snapshot.countdown {
        draw_digit(canvas, n, center, DIGIT_COLOR);
    }
    if let Some(t) = snapshot.flag_phase_time {
        draw_flag(canvas, center, wave_frame(t));
    }
}

// ---------------------------------------------------------------------------
// Seven-segment digit
// ---------------------------------------------------------------------------

/// Lit segments a..g (top, top-right, bottom-right, bottom, bottom-left,
/// top-left, middle)
pub fn segments(digit: u32) -> [bool; 7] {
    match digit {
        0 => [true, true, true, true, true, true, false],
        1 => [false, true, true, false, false, false, false],
        2 => [true, true, false, true, true, false, true],
        3 => [true, true, true, true, false, false, true],
        4 => [false, true, true, false, false, true, true],
        5 => [true, false, true, true, false, true, true],
        6 => [true, false, true, true, true, true, true],
        7 => [true, true, true, false, false, false, false],
        8 => [true; 7],
        9 => [true, true, true, true, false, true, true],
        _ => [false; 7],
    }
}

/// Digit centered at `center`
pub fn draw_digit(canvas: &mut Canvas, digit: u32, center: (f64, f64), color: u32) {
    let (cx, cy) = center;
    let (hw, hh) = (DIGIT_WIDTH / 2.0, DIGIT_HEIGHT / 2.0);
    let (left, right, top, mid, bottom) = (cx - hw, cx + hw, cy - hh, cy, cy + hh);
    let s = SEGMENT_THICKNESS;

    let rects = [
        (left, top, right, top + s),
        (right - s, top, right, mid),
        (right - s, mid, right, bottom),
        (left, bottom - s, right, bottom),
        (left, mid, left + s, bottom),
        (left, top, left + s, mid),
        (left, mid - s / 2.0, right, mid + s / 2.0),
    ];
    for (lit, (x0, y0, x1, y1)) in segments(digit).into_iter().zip(rects) {
        if lit {
            canvas.fill_rect(x0, y0, x1, y1, color);
        }
    }
}

// ---------------------------------------------------------------------------
// Checkered flag
// ---------------------------------------------------------------------------

/// Animation frame (0 or 1) for a time since the flag went up
pub fn wave_frame(phase_time: f64) -> usize {
    (phase_time.max(0.0) * WAVE_RATE).floor() as usize % 2
}

/// Block color for cell `index` (row-major) at grid position `(row, col)`.
/// Two of every three blocks flip with the frame; the rest keep the base
/// checker pattern.
pub fn flag_cell_color(index: usize, row: usize, col: usize, frame: usize) -> u32 {
    let k = index % 3;
    if k == frame {
        FLAG_LIGHT
    } else if k == (frame + 1) % 2 {
        FLAG_DARK
    } else if (row + col) % 2 == 0 {
        FLAG_LIGHT
    } else {
        FLAG_DARK
    }
}

pub fn draw_flag(canvas: &mut Canvas, center: (f64, f64), frame: usize) {
    let (w, h) = FLAG_SIZE;
    let x0 = center.0 - w / 2.0;
    let y0 = center.1 - h / 2.0;
    let cols = (w / FLAG_BLOCK) as usize;
    let rows = (h / FLAG_BLOCK) as usize;

    for row in 0..rows {
        for col in 0..cols {
            let bx = x0 + col as f64 * FLAG_BLOCK;
            let by = y0 + row as f64 * FLAG_BLOCK;
            let color = flag_cell_color(row * cols + col, row, col, frame);
            canvas.fill_rect(bx, by, bx + FLAG_BLOCK, by + FLAG_BLOCK, color);
        }
    }
    canvas.stroke_segment((x0 - 10.0, y0), (x0 - 10.0, y0 + h), 4.0, FLAG_POLE);
}
