// src/scene.rs

use std::fs;
use std::path::Path;

use glam::{DAffine2, DVec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{FovError, Result};
use crate::fov::{simulate_fov, FovParameters, MAX_FOV_ANGLE_DEGREES};
use crate::geometry::{Point2, Polygon, Segment};
use crate::units::meters_to_feet;

pub const DEFAULT_BOUNDARY_STYLE: &str = "Boundary";
pub const PRESET_ROTATIONS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Values shared by every camera of a run. Distances are in metres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub fov_angle_degrees: f64,
    pub rotation_degrees: f64,
    pub max_distance_m: f64,
    /// Quarter-turn added on top of `rotation_degrees`.
    pub preset_rotation: f64,
    /// Line style whose detail lines block sight.
    pub boundary_style: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fov_angle_degrees: 55.0,
            rotation_degrees: 90.0,
            max_distance_m: 25.0,
            preset_rotation: 0.0,
            boundary_style: DEFAULT_BOUNDARY_STYLE.to_string(),
        }
    }
}

/// Placement of a linked model inside the host model.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkTransform {
    pub translation: Point2,
    pub rotation_degrees: f64,
}

impl LinkTransform {
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_angle_translation(self.rotation_degrees.to_radians(), self.translation.into())
    }

    pub fn apply(&self, point: Point2) -> Point2 {
        self.to_affine().transform_point2(DVec2::from(point)).into()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDescriptor {
    pub name: String,
    /// In link coordinates when `link` is set, host coordinates otherwise.
    pub position: Point2,
    #[serde(default)]
    pub rotation_offset_degrees: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTransform>,
}

impl CameraDescriptor {
    pub fn new(name: impl Into<String>, position: Point2) -> Self {
        Self { name: name.into(), position, rotation_offset_degrees: 0.0, link: None }
    }

    /// Position in host coordinates.
    pub fn host_position(&self) -> Point2 {
        match &self.link {
            Some(link) => link.apply(self.position),
            None => self.position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    pub style: String,
    #[serde(flatten)]
    pub segment: Segment,
}

impl DetailLine {
    pub fn new(style: impl Into<String>, segment: Segment) -> Self {
        Self { style: style.into(), segment }
    }
}

/// Result of simulating one camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraCoverage {
    pub camera: String,
    pub origin: Point2,
    pub rotation_degrees: f64,
    pub polygon: Polygon,
}

/// Everything one coverage run needs, passed in explicitly.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub settings: SimulationSettings,
    pub cameras: Vec<CameraDescriptor>,
    pub detail_lines: Vec<DetailLine>,
}

impl Scene {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scene = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            "loaded scene {}: {} cameras, {} detail lines",
            path.display(),
            scene.cameras.len(),
            scene.detail_lines.len()
        );
        Ok(scene)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !PRESET_ROTATIONS.contains(&self.settings.preset_rotation) {
            return Err(FovError::InvalidScene(format!(
                "preset rotation must be one of 0, 90, 180 or 270, got {}",
                self.settings.preset_rotation
            )));
        }
        let fov = self.settings.fov_angle_degrees;
        if fov > MAX_FOV_ANGLE_DEGREES {
            return Err(FovError::InvalidScene(format!(
                "fov angle must be at most {MAX_FOV_ANGLE_DEGREES} degrees, got {fov}"
            )));
        }
        if let Some(camera) = self.cameras.iter().find(|c| c.name.trim().is_empty()) {
            return Err(FovError::InvalidScene(format!(
                "camera at ({}, {}) has no name",
                camera.position.x, camera.position.y
            )));
        }
        Ok(())
    }

    /// Segments of the detail lines drawn in the boundary style.
    pub fn obstructions(&self) -> Vec<Segment> {
        self.detail_lines
            .iter()
            .filter(|line| line.style == self.settings.boundary_style)
            .map(|line| line.segment)
            .collect()
    }

    pub fn camera_parameters(&self, camera: &CameraDescriptor) -> FovParameters {
        let s = &self.settings;
        FovParameters::new(
            camera.host_position(),
            s.fov_angle_degrees,
            s.rotation_degrees + s.preset_rotation + camera.rotation_offset_degrees,
            meters_to_feet(s.max_distance_m),
        )
    }

    pub fn simulate_camera(&self, camera: &CameraDescriptor, obstructions: &[Segment]) -> Result<CameraCoverage> {
        let params = self.camera_parameters(camera);
        let polygon = simulate_fov(&params, obstructions)?;
        if polygon.is_degenerate() {
            warn!("camera {} produced a degenerate coverage polygon", camera.name);
        }
        Ok(CameraCoverage {
            camera: camera.name.clone(),
            origin: params.origin,
            rotation_degrees: params.rotation_degrees,
            polygon,
        })
    }

    /// Coverage for every camera, in declaration order.
    pub fn simulate_all(&self) -> Result<Vec<CameraCoverage>> {
        let obstructions = self.obstructions();
        if obstructions.is_empty() && !self.detail_lines.is_empty() {
            warn!(
                "none of the {} detail lines use style {:?}",
                self.detail_lines.len(),
                self.settings.boundary_style
            );
        }
        self.cameras
            .iter()
            .map(|camera| self.simulate_camera(camera, &obstructions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let scene = Scene::from_json_str("{}").unwrap();
        assert_eq!(scene.settings, SimulationSettings::default());
        assert_eq!(scene.settings.fov_angle_degrees, 55.0);
        assert_eq!(scene.settings.boundary_style, "Boundary");
        assert!(scene.simulate_all().unwrap().is_empty());
    }

    #[test]
    fn parses_cameras_and_lines() {
        let json = r#"{
            "settings": { "fov_angle_degrees": 90, "rotation_degrees": 0, "max_distance_m": 3.048 },
            "cameras": [ { "name": "C1", "position": { "x": 0, "y": 0 } } ],
            "detail_lines": [
                { "style": "Boundary", "start": { "x": -5, "y": -5 }, "end": { "x": 5, "y": -5 } },
                { "style": "Thin Lines", "start": { "x": -5, "y": -2 }, "end": { "x": 5, "y": -2 } }
            ]
        }"#;
        let scene = Scene::from_json_str(json).unwrap();
        assert_eq!(scene.obstructions().len(), 1);

        let coverage = scene.simulate_all().unwrap();
        assert_eq!(coverage.len(), 1);
        let middle = coverage[0].polygon.points()[46];
        // 3.048 m is 10 ft; only the boundary-style wall at 5 ft clips
        assert!((middle.y + 5.0).abs() < 1e-9, "{middle:?}");
    }

    #[test]
    fn rotations_add_up() {
        let mut scene = Scene::default();
        scene.settings.rotation_degrees = 10.0;
        scene.settings.preset_rotation = 180.0;
        let mut camera = CameraDescriptor::new("C", Point2::ORIGIN);
        camera.rotation_offset_degrees = 5.0;
        assert_eq!(scene.camera_parameters(&camera).rotation_degrees, 195.0);
    }

    #[test]
    fn linked_camera_is_moved_into_host_coordinates() {
        let mut camera = CameraDescriptor::new("Linked", Point2::new(1.0, 0.0));
        camera.link = Some(LinkTransform { translation: Point2::new(10.0, 20.0), rotation_degrees: 90.0 });
        let p = camera.host_position();
        assert!((p.x - 10.0).abs() < 1e-12 && (p.y - 21.0).abs() < 1e-12, "{p:?}");
    }

    #[test]
    fn rejects_unknown_preset() {
        let err = Scene::from_json_str(r#"{ "settings": { "preset_rotation": 45 } }"#).unwrap_err();
        assert!(matches!(err, FovError::InvalidScene(_)));
    }

    #[test]
    fn rejects_fov_wider_than_a_full_turn() {
        let json = r#"{
            "settings": { "fov_angle_degrees": 1e19 },
            "cameras": [ { "name": "C", "position": { "x": 0, "y": 0 } } ]
        }"#;
        assert!(matches!(Scene::from_json_str(json), Err(FovError::InvalidScene(_))));

        // a scene built in code is still caught when simulated
        let mut scene = Scene::default();
        scene.settings.fov_angle_degrees = 1e19;
        scene.cameras.push(CameraDescriptor::new("C", Point2::ORIGIN));
        assert!(matches!(scene.simulate_all(), Err(FovError::InvalidParameter { .. })));
    }

    #[test]
    fn rejects_unnamed_camera() {
        let json = r#"{ "cameras": [ { "name": " ", "position": { "x": 1, "y": 2 } } ] }"#;
        assert!(matches!(Scene::from_json_str(json), Err(FovError::InvalidScene(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(Scene::from_json_str("{ cameras"), Err(FovError::Json(_))));
    }

    #[test]
    fn json_survives_a_save_and_load() {
        let mut scene = Scene::default();
        scene.cameras.push(CameraDescriptor::new("A", Point2::new(3.0, 4.0)));
        scene.detail_lines.push(DetailLine::new(
            DEFAULT_BOUNDARY_STYLE,
            Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
        ));
        let text = scene.to_json_string().unwrap();
        assert_eq!(Scene::from_json_str(&text).unwrap(), scene);
    }
}
