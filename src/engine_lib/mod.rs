// src/engine_lib/mod.rs
pub mod camera;
pub mod controller;
pub mod coverage_state;

pub use camera::ViewCamera;
pub use controller::ViewController;
pub use coverage_state::CoverageState;
