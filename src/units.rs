// src/units.rs
//
// Users type distances in metres; the host model stores feet.

pub const MM_PER_FOOT: f64 = 304.8;
pub const METERS_PER_FOOT: f64 = MM_PER_FOOT / 1000.0;

pub fn mm_to_feet(mm: f64) -> f64 {
    mm / MM_PER_FOOT
}

pub fn feet_to_mm(feet: f64) -> f64 {
    feet * MM_PER_FOOT
}

pub fn meters_to_feet(meters: f64) -> f64 {
    mm_to_feet(meters * 1000.0)
}

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}
