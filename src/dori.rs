// src/dori.rs

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{FovError, Result};
use crate::units::METERS_PER_FOOT;

/// Required pixels per foot for each class (25, 63, 125 and 250 px/m).
pub const DETECTION_PPF: f64 = 7.62;
pub const OBSERVATION_PPF: f64 = 19.2024;
pub const RECOGNITION_PPF: f64 = 38.1;
pub const IDENTIFICATION_PPF: f64 = 76.2;

/// Furthest distance, in metres, at which each DORI class is still met.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoriDistances {
    pub detection: f64,
    pub observation: f64,
    pub recognition: f64,
    pub identification: f64,
}

impl DoriDistances {
    pub fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("Detection", self.detection),
            ("Observation", self.observation),
            ("Recognition", self.recognition),
            ("Identification", self.identification),
        ]
    }
}

/// Default sight distances for a camera with `horizontal_resolution_px` pixels
/// spread over `fov_angle_degrees`.
pub fn dori_distances(horizontal_resolution_px: f64, fov_angle_degrees: f64) -> Result<DoriDistances> {
    if !horizontal_resolution_px.is_finite() {
        return Err(FovError::NonFinite("horizontal resolution"));
    }
    if !fov_angle_degrees.is_finite() {
        return Err(FovError::NonFinite("FOV angle"));
    }
    if horizontal_resolution_px <= 0.0 {
        return Err(FovError::InvalidParameter {
            name: "horizontal resolution",
            reason: format!("must be positive, got {horizontal_resolution_px}"),
        });
    }
    if fov_angle_degrees <= 0.0 {
        return Err(FovError::InvalidParameter {
            name: "FOV angle",
            reason: format!("must be positive, got {fov_angle_degrees}"),
        });
    }

    let distance = |ppf: f64| {
        // the resolution covers the FOV arc; scale up to a full circle and
        // take its radius
        let circumference_ft = (horizontal_resolution_px / ppf) * (360.0 / fov_angle_degrees);
        round_tenth(circumference_ft / TAU * METERS_PER_FOOT)
    };

    Ok(DoriDistances {
        detection: distance(DETECTION_PPF),
        observation: distance(OBSERVATION_PPF),
        recognition: distance(RECOGNITION_PPF),
        identification: distance(IDENTIFICATION_PPF),
    })
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hd_at_ninety_degrees() {
        let d = dori_distances(1920.0, 90.0).unwrap();
        assert_eq!(d.detection, 48.9);
        assert_eq!(d.observation, 19.4);
        assert_eq!(d.recognition, 9.8);
        assert_eq!(d.identification, 4.9);
    }

    #[test]
    fn classes_are_ordered() {
        let d = dori_distances(2560.0, 55.0).unwrap();
        assert!(d.detection > d.observation);
        assert!(d.observation > d.recognition);
        assert!(d.recognition > d.identification);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(dori_distances(1920.0, 0.0), Err(FovError::InvalidParameter { .. })));
        assert!(matches!(dori_distances(0.0, 90.0), Err(FovError::InvalidParameter { .. })));
        assert!(matches!(dori_distances(f64::NAN, 90.0), Err(FovError::NonFinite(_))));
    }
}
