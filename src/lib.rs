// src/lib.rs

//! Camera field-of-view coverage for plan views.
//!
//! A camera at a point casts one ray per whole degree of its field of view;
//! every ray stops at the nearest boundary line, and the ray ends form the
//! coverage polygon a host application turns into a filled region.

pub mod dori;
pub mod error;
pub mod fov;
pub mod generator;
pub mod geometry;
pub mod intersection;
pub mod rotation;
pub mod scene;
pub mod units;

pub use error::{FovError, Result};
pub use fov::{fov_endpoints, simulate_fov, FovParameters};
pub use geometry::{Point2, Polygon, Segment};
pub use intersection::{find_closest_intersection, line_intersection, segment_intersection};
pub use rotation::{rotate, rotate_z};
pub use scene::{CameraCoverage, CameraDescriptor, DetailLine, Scene, SimulationSettings};
