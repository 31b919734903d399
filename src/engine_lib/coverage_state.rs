// src/engine_lib/coverage_state.rs

use fov_magic::fov::fov_endpoints;
use fov_magic::geometry::{Point2, Segment};
use fov_magic::scene::{CameraCoverage, Scene};
use log::{debug, error};

/// The scene being edited plus the coverage computed from it. Coverage is
/// only recomputed after an edit marks it dirty.
pub struct CoverageState {
    scene: Scene,
    obstructions: Vec<Segment>,
    coverage: Vec<CameraCoverage>,
    selected: usize,
    dirty: bool,
    last_error: Option<String>,
}

impl CoverageState {
    pub fn new(scene: Scene) -> Self {
        let mut state = Self {
            obstructions: scene.obstructions(),
            scene,
            coverage: Vec::new(),
            selected: 0,
            dirty: true,
            last_error: None,
        };
        state.refresh();
        state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access for editors; the caller must call `mark_dirty` when
    /// something changed.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn obstructions(&self) -> &[Segment] {
        &self.obstructions
    }

    pub fn coverage(&self) -> &[CameraCoverage] {
        &self.coverage
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.scene.cameras.len() {
            self.selected = index;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recomputes coverage if an edit happened since the last call.
    pub fn refresh(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.obstructions = self.scene.obstructions();
        match self.scene.simulate_all() {
            Ok(coverage) => {
                debug!("recomputed coverage for {} cameras", coverage.len());
                self.coverage = coverage;
                self.last_error = None;
            }
            Err(e) => {
                error!("coverage failed: {e}");
                self.coverage.clear();
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    pub fn rotate_selected(&mut self, delta_degrees: f64) {
        if let Some(camera) = self.scene.cameras.get_mut(self.selected) {
            camera.rotation_offset_degrees = (camera.rotation_offset_degrees + delta_degrees).rem_euclid(360.0);
            self.dirty = true;
        }
    }

    /// Moves the selected camera so that its host position lands on `target`.
    pub fn move_selected(&mut self, target: Point2) {
        if let Some(camera) = self.scene.cameras.get_mut(self.selected) {
            let delta = target.sub(&camera.host_position());
            let link_delta = match &camera.link {
                // undo the link rotation so the host-space move maps back
                Some(link) => {
                    let inverse = fov_magic::rotate_z(delta.extend(), -link.rotation_degrees);
                    Point2::from_xy(inverse)
                }
                None => delta,
            };
            camera.position = camera.position.add(&link_delta);
            self.dirty = true;
        }
    }

    /// Outer rays of the selected camera's cone, for highlighting.
    pub fn selected_edges(&self) -> Option<(Point2, Point2, Point2)> {
        let camera = self.scene.cameras.get(self.selected)?;
        let params = self.scene.camera_parameters(camera);
        let (left, right) = fov_endpoints(params.origin, params.angle_degrees, params.max_distance, params.rotation_degrees);
        Some((params.origin, left, right))
    }
}
