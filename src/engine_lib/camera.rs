// src/engine_lib/camera.rs

use fov_magic::geometry::{Point2, Segment};

const MIN_PIXELS_PER_FOOT: f64 = 0.05;
const MAX_PIXELS_PER_FOOT: f64 = 500.0;

/// Orthographic plan-view camera: world feet to screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    /// World point shown at the screen center.
    pub center: Point2,
    pub pixels_per_foot: f64,
}

impl ViewCamera {
    pub fn new(center: Point2, pixels_per_foot: f64) -> Self {
        Self {
            center,
            pixels_per_foot: pixels_per_foot.clamp(MIN_PIXELS_PER_FOOT, MAX_PIXELS_PER_FOOT),
        }
    }

    /// Centers the view on everything in `segments` and `points` with a small
    /// margin.
    pub fn framing(segments: &[Segment], points: &[Point2], screen_width: f32, screen_height: f32) -> Self {
        let all = segments
            .iter()
            .flat_map(|s| [s.start, s.end])
            .chain(points.iter().copied());

        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in all {
            min = Point2::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2::new(max.x.max(p.x), max.y.max(p.y));
        }
        if !min.is_finite() || !max.is_finite() {
            return Self::new(Point2::ORIGIN, 10.0);
        }

        let width = (max.x - min.x).max(1.0) * 1.2;
        let height = (max.y - min.y).max(1.0) * 1.2;
        let scale = (screen_width as f64 / width).min(screen_height as f64 / height);
        Self::new(Point2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0), scale)
    }

    /// Screen pixels have their origin at the top left and grow downwards;
    /// world +Y points up the screen.
    pub fn world_to_screen(&self, p: &Point2, screen_width: f32, screen_height: f32) -> [f32; 2] {
        let x = (p.x - self.center.x) * self.pixels_per_foot + screen_width as f64 / 2.0;
        let y = screen_height as f64 / 2.0 - (p.y - self.center.y) * self.pixels_per_foot;
        [x as f32, y as f32]
    }

    pub fn screen_to_world(&self, pixel: [f32; 2], screen_width: f32, screen_height: f32) -> Point2 {
        let x = (pixel[0] as f64 - screen_width as f64 / 2.0) / self.pixels_per_foot + self.center.x;
        let y = (screen_height as f64 / 2.0 - pixel[1] as f64) / self.pixels_per_foot + self.center.y;
        Point2::new(x, y)
    }

    /// Pans by a screen-space offset in pixels.
    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        self.center = Point2::new(
            self.center.x + dx / self.pixels_per_foot,
            self.center.y - dy / self.pixels_per_foot,
        );
    }

    /// Zooms by `factor` keeping the world point under `pixel` fixed.
    pub fn zoom_at(&mut self, factor: f64, pixel: [f32; 2], screen_width: f32, screen_height: f32) {
        let anchor = self.screen_to_world(pixel, screen_width, screen_height);
        self.pixels_per_foot = (self.pixels_per_foot * factor).clamp(MIN_PIXELS_PER_FOOT, MAX_PIXELS_PER_FOOT);
        let moved = self.screen_to_world(pixel, screen_width, screen_height);
        self.center = Point2::new(
            self.center.x + anchor.x - moved.x,
            self.center.y + anchor.y - moved.y,
        );
    }
}
