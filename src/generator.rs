// src/generator.rs

use rand::Rng;

use crate::geometry::{Point2, Segment};

/// Random obstruction layouts for benchmarks, tests and the demo scene.
pub struct ObstructionGenerator;

impl ObstructionGenerator {
    /// Closed wall loop of a room around `center`, with corner angles
    /// and radii perturbed around a regular polygon.
    pub fn room(
        center: Point2,
        avg_radius: f64,
        sides: usize,
        rng: &mut impl Rng,
    ) -> Vec<Segment> {
        if sides < 3 {
            return Vec::new();
        }

        let step = std::f64::consts::TAU / sides as f64;
        let max_perturbation = step * 0.3;

        let mut angles: Vec<f64> = (0..sides)
            .map(|i| i as f64 * step + rng.gen_range(-max_perturbation..max_perturbation))
            .collect();

        for i in 1..sides {
            if angles[i] <= angles[i - 1] {
                angles[i] = angles[i - 1] + 0.01;
            }
        }

        let min_radius = avg_radius * 0.8;
        let max_radius = avg_radius * 1.2;

        let corners: Vec<Point2> = angles
            .into_iter()
            .map(|angle| {
                let radius = rng.gen_range(min_radius..max_radius);
                Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();

        (0..sides)
            .map(|i| Segment::new(corners[i], corners[(i + 1) % sides]))
            .collect()
    }

    /// `count` loose detail lines with start points inside `min..max` and
    /// lengths up to `max_len`.
    pub fn scatter(
        min: Point2,
        max: Point2,
        count: usize,
        max_len: f64,
        rng: &mut impl Rng,
    ) -> Vec<Segment> {
        (0..count)
            .map(|_| {
                let start = Point2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
                let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                let length = rng.gen_range(0.0..=max_len);
                let end = Point2::new(start.x + length * angle.cos(), start.y + length * angle.sin());
                Segment::new(start, end)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fov::{simulate_fov, FovParameters};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn room_is_a_closed_loop() {
        let mut rng = StdRng::seed_from_u64(7);
        let walls = ObstructionGenerator::room(Point2::new(3.0, -2.0), 20.0, 6, &mut rng);
        assert_eq!(walls.len(), 6);
        for i in 0..walls.len() {
            assert_eq!(walls[i].end, walls[(i + 1) % walls.len()].start);
        }
    }

    #[test]
    fn camera_inside_room_never_sees_past_the_walls() {
        let mut rng = StdRng::seed_from_u64(42);
        let walls = ObstructionGenerator::room(Point2::ORIGIN, 10.0, 8, &mut rng);
        let params = FovParameters::new(Point2::ORIGIN, 360.0, 0.0, 100.0);
        let polygon = simulate_fov(&params, &walls).unwrap();
        assert_eq!(polygon.len(), 361);
        for p in &polygon.points()[1..] {
            // corners lie at most 1.2 * radius from the center
            assert!(p.distance_to(&Point2::ORIGIN) <= 12.0 + 1e-6, "{p:?}");
        }
    }

    #[test]
    fn too_few_sides_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ObstructionGenerator::room(Point2::ORIGIN, 1.0, 2, &mut rng).is_empty());
    }

    #[test]
    fn scatter_respects_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let lines = ObstructionGenerator::scatter(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0), 25, 0.5, &mut rng);
        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|l| l.length() <= 0.5 + 1e-12));
    }
}
