// src/demo_scene.rs

use fov_magic::generator::ObstructionGenerator;
use fov_magic::geometry::{Point2, Segment};
use fov_magic::scene::{CameraDescriptor, DetailLine, LinkTransform, Scene, DEFAULT_BOUNDARY_STYLE};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DEMO_SEED: u64 = 0x00F0_7A61;

fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> DetailLine {
    DetailLine::new(DEFAULT_BOUNDARY_STYLE, Segment::new(Point2::new(x1, y1), Point2::new(x2, y2)))
}

/// Two rooms joined by a doorway, a column room on the side, and a few
/// cameras, one of them placed through a linked model.
pub fn create_demo_scene() -> Scene {
    let mut detail_lines = vec![
        // outer shell, 120 x 60 ft
        wall(-60.0, -30.0, 60.0, -30.0),
        wall(60.0, -30.0, 60.0, 30.0),
        wall(60.0, 30.0, -60.0, 30.0),
        wall(-60.0, 30.0, -60.0, -30.0),
        // partition with a doorway
        wall(0.0, -30.0, 0.0, -5.0),
        wall(0.0, 5.0, 0.0, 30.0),
        // shelving, drawn but not a boundary
        DetailLine::new("Thin Lines", Segment::new(Point2::new(20.0, -10.0), Point2::new(45.0, -10.0))),
    ];

    let mut rng = StdRng::seed_from_u64(DEMO_SEED);
    detail_lines.extend(
        ObstructionGenerator::room(Point2::new(30.0, 12.0), 6.0, 6, &mut rng)
            .into_iter()
            .map(|segment| DetailLine::new(DEFAULT_BOUNDARY_STYLE, segment)),
    );

    let mut corner = CameraDescriptor::new("Entrance", Point2::new(-55.0, 25.0));
    corner.rotation_offset_degrees = 315.0;

    let hall = CameraDescriptor::new("Hall", Point2::new(-5.0, 0.0));

    let mut linked = CameraDescriptor::new("Store (linked)", Point2::new(0.0, 0.0));
    linked.link = Some(LinkTransform { translation: Point2::new(55.0, -25.0), rotation_degrees: 0.0 });
    linked.rotation_offset_degrees = 135.0;

    let mut scene = Scene { detail_lines, ..Scene::default() };
    scene.cameras = vec![corner, hall, linked];
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scene_is_valid_and_clipped() {
        let scene = create_demo_scene();
        scene.validate().unwrap();
        assert_eq!(scene.obstructions().len(), scene.detail_lines.len() - 1);

        let coverage = scene.simulate_all().unwrap();
        assert_eq!(coverage.len(), 3);
        for c in &coverage {
            assert_eq!(c.polygon.len(), 56);
            assert!(!c.polygon.is_degenerate(), "{}", c.camera);
        }
    }
}
