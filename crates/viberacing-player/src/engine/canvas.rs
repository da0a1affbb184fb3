//! Software rasteriser over a 32-bit ARGB framebuffer.
//!
//! Coordinates are floating-point screen pixels. A pixel is covered when its
//! center `(px + 0.5, py + 0.5)` lies inside the shape; everything is clipped
//! to the buffer.

/// Owned framebuffer, row-major, `0xAARRGGBB`
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF000000; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[allow(dead_code)] // Pixel probe for tests
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Overwrite with another canvas of the same size (pre-rendered layers)
    pub fn copy_from(&mut self, other: &Canvas) {
        let n = self.pixels.len().min(other.pixels.len());
        self.pixels[..n].copy_from_slice(&other.pixels[..n]);
    }

    #[allow(dead_code)]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Pixel index range whose centers fall in `[lo, hi)`, clipped to `0..len`
    fn span(lo: f64, hi: f64, len: usize) -> std::ops::Range<i32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().min(len as f64);
        if !(start < end) {
            return 0..0;
        }
        start as i32..end as i32
    }

    // --- rectangles ------------------------------------------------------

    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: u32) {
        let xs = Self::span(x0.min(x1), x0.max(x1), self.width);
        for py in Self::span(y0.min(y1), y0.max(y1), self.height) {
            let row = py as usize * self.width;
            for px in xs.clone() {
                self.pixels[row + px as usize] = color;
            }
        }
    }

    /// Outline drawn inward from the rectangle's edge
    pub fn stroke_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, thickness: f64, color: u32) {
        let t = thickness.max(0.0);
        self.fill_rect(x0, y0, x1, y0 + t, color);
        self.fill_rect(x0, y1 - t, x1, y1, color);
        self.fill_rect(x0, y0 + t, x0 + t, y1 - t, color);
        self.fill_rect(x1 - t, y0 + t, x1, y1 - t, color);
    }

    // --- round shapes and lines -----------------------------------------

    #[allow(dead_code)]
    pub fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: u32) {
        self.stroke_segment((cx, cy), (cx, cy), radius * 2.0, color);
    }

    /// Capsule of the given width around segment `a → b` (round caps)
    pub fn stroke_segment(&mut self, a: (f64, f64), b: (f64, f64), width: f64, color: u32) {
        let r = width / 2.0;
        if r <= 0.0 {
            return;
        }
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len_sq = dx * dx + dy * dy;
        let xs = Self::span(a.0.min(b.0) - r, a.0.max(b.0) + r, self.width);
        let ys = Self::span(a.1.min(b.1) - r, a.1.max(b.1) + r, self.height);
        let r_sq = r * r;

        for py in ys {
            let y = py as f64 + 0.5;
            for px in xs.clone() {
                let x = px as f64 + 0.5;
                let t = if len_sq > 0.0 {
                    (((x - a.0) * dx + (y - a.1) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (a.0 + t * dx - x, a.1 + t * dy - y);
                if qx * qx + qy * qy <= r_sq {
                    self.pixels[py as usize * self.width + px as usize] = color;
                }
            }
        }
    }

    pub fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: u32) {
        for pair in points.windows(2) {
            self.stroke_segment(pair[0], pair[1], width, color);
        }
    }

    /// Polyline drawn as `dash`-long strokes separated by `gap`, with the
    /// pattern running continuously across vertices
    pub fn dashed_polyline(&mut self, points: &[(f64, f64)], dash: f64, gap: f64, width: f64, color: u32) {
        let period = dash + gap;
        if dash <= 0.0 || gap <= 0.0 {
            self.stroke_polyline(points, width, color);
            return;
        }

        let mut travelled = 0.0;
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let len = (b.0 - a.0).hypot(b.1 - a.1);
            if len == 0.0 {
                continue;
            }
            let at = |s: f64| (a.0 + (b.0 - a.0) * s / len, a.1 + (b.1 - a.1) * s / len);

            let mut s = 0.0;
            while s < len {
                let phase = (travelled + s) % period;
                let next = if phase < dash {
                    let end = (s + dash - phase).min(len);
                    self.stroke_segment(at(s), at(end), width, color);
                    end
                } else {
                    (s + period - phase).min(len)
                };
                // Rounding can stall `s` right at a pattern boundary
                s = if next > s { next } else { len };
            }
            travelled += len;
        }
    }

    // --- polygons ----------------------------------------------------------

    /// Even-odd scanline fill
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: u32) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for py in Self::span(min_y, max_y, self.height) {
            let y = py as f64 + 0.5;
            crossings.clear();
            for (i, &(xi, yi)) in points.iter().enumerate() {
                let (xj, yj) = points[(i + 1) % points.len()];
                if (yi <= y && y < yj) || (yj <= y && y < yi) {
                    crossings.push(xi + (y - yi) * (xj - xi) / (yj - yi));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            let row = py as usize * self.width;
            for pair in crossings.chunks_exact(2) {
                for px in Self::span(pair[0], pair[1], self.width) {
                    self.pixels[row + px as usize] = color;
                }
            }
        }
    }

    /// Closed outline
    pub fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: u32) {
        if points.len() < 2 {
            return;
        }
        self.stroke_polyline(points, width, color);
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            self.stroke_segment(last, first, width, color);
        }
    }
}

/// `#rrggbb` as an opaque pixel
pub const fn rgb(hex: u32) -> u32 {
    0xFF000000 | (hex & 0x00FF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF0000;
    const BLACK: u32 = 0xFF000000;

    fn count(c: &Canvas, color: u32) -> usize {
        c.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn new_canvas_is_opaque_black() {
        let c = Canvas::new(4, 3);
        assert_eq!(c.pixels().len(), 12);
        assert_eq!(count(&c, BLACK), 12);
    }

    #[test]
    fn put_out_of_bounds_is_ignored() {
        let mut c = Canvas::new(4, 4);
        c.put(-1, 0, RED);
        c.put(4, 0, RED);
        c.put(0, 9, RED);
        c.put(3, 3, RED);
        assert_eq!(count(&c, RED), 1);
        assert_eq!(c.get(3, 3), Some(RED));
        assert_eq!(c.get(4, 3), None);
    }

    #[test]
    fn fill_rect_covers_pixel_centers() {
        let mut c = Canvas::new(10, 10);
        c.fill_rect(2.0, 3.0, 5.0, 4.0, RED);
        assert_eq!(count(&c, RED), 3);
        for x in 2..5 {
            assert_eq!(c.get(x, 3), Some(RED), "pixel ({}, 3)", x);
        }
        assert_eq!(c.get(5, 3), Some(BLACK));
    }

    #[test]
    fn fill_rect_clips_and_accepts_swapped_corners() {
        let mut c = Canvas::new(8, 8);
        c.fill_rect(20.0, 20.0, -5.0, -5.0, RED);
        assert_eq!(count(&c, RED), 64);
    }

    #[test]
    fn stroke_rect_leaves_interior() {
        let mut c = Canvas::new(10, 10);
        c.stroke_rect(1.0, 1.0, 9.0, 9.0, 1.0, RED);
        assert_eq!(count(&c, RED), 8 * 4 - 4);
        assert_eq!(c.get(5, 5), Some(BLACK));
        assert_eq!(c.get(1, 1), Some(RED));
    }

    #[test]
    fn disc_area_is_close_to_pi_r_squared() {
        let mut c = Canvas::new(100, 100);
        c.fill_disc(50.0, 50.0, 20.0, RED);
        let expected = std::f64::consts::PI * 400.0;
        let got = count(&c, RED) as f64;
        assert!((got - expected).abs() / expected < 0.03, "disc area {} vs {}", got, expected);
        assert_eq!(c.get(50, 50), Some(RED));
        assert_eq!(c.get(50, 75), Some(BLACK));
    }

    #[test]
    fn segment_has_requested_width() {
        let mut c = Canvas::new(40, 40);
        c.stroke_segment((5.0, 20.0), (35.0, 20.0), 4.0, RED);
        let column: Vec<i32> = (0..40).filter(|&y| c.get(20, y) == Some(RED)).collect();
        assert_eq!(column, vec![18, 19, 20, 21]);
    }

    #[test]
    fn polygon_fill_square_and_triangle() {
        let mut c = Canvas::new(20, 20);
        c.fill_polygon(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)], RED);
        assert_eq!(count(&c, RED), 16);

        let mut c = Canvas::new(20, 20);
        c.fill_polygon(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], RED);
        let got = count(&c, RED);
        assert!((45..=55).contains(&got), "triangle covered {} pixels", got);
        assert_eq!(c.get(1, 1), Some(RED));
        assert_eq!(c.get(8, 8), Some(BLACK));
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let mut c = Canvas::new(10, 10);
        c.fill_polygon(&[(1.0, 1.0), (5.0, 5.0)], RED);
        c.fill_polygon(&[(1.0, 1.0), (5.0, 1.0), (9.0, 1.0)], RED);
        assert_eq!(count(&c, RED), 0);
    }

    #[test]
    fn dashes_alternate_along_the_line() {
        let mut c = Canvas::new(64, 8);
        c.dashed_polyline(&[(0.0, 4.0), (20.0, 4.0), (60.0, 4.0)], 10.0, 10.0, 2.0, RED);
        // [0, 10) on, [10, 20) off, [20, 30) on across the vertex, ...
        assert_eq!(c.get(5, 4), Some(RED));
        assert_eq!(c.get(15, 4), Some(BLACK));
        assert_eq!(c.get(25, 4), Some(RED));
        assert_eq!(c.get(35, 4), Some(BLACK));
        assert_eq!(c.get(45, 4), Some(RED));
    }

    #[test]
    fn copy_from_replaces_contents() {
        let mut layer = Canvas::new(5, 5);
        layer.clear(RED);
        let mut c = Canvas::new(5, 5);
        c.copy_from(&layer);
        assert_eq!(c, layer);
    }

    #[test]
    fn rgb_sets_alpha() {
        assert_eq!(rgb(0x23402b), 0xFF23402B);
        assert_eq!(rgb(0xFF123456), 0xFF123456);
    }
}
