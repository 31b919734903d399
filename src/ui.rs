// src/ui.rs

use fov_magic::dori::dori_distances;
use fov_magic::scene::PRESET_ROTATIONS;

use crate::engine_lib::coverage_state::CoverageState;

/// Upper end of the max distance slider, in metres.
const MAX_DISTANCE_M: f64 = 500.0;

/// Panel-only inputs that do not belong to the scene.
pub struct PanelState {
    pub horizontal_resolution: f64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self { horizontal_resolution: 1920.0 }
    }
}

pub fn build_ui(ctx: &egui::Context, state: &mut CoverageState, panel: &mut PanelState) {
    egui::Window::new("Camera FOV")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            camera_section(ui, state);
            ui.separator();
            settings_section(ui, state);
            ui.separator();
            dori_section(ui, state, panel);
            ui.separator();
            stats_section(ui, state);
            ui.separator();
            ui.label("W/A/S/D or arrows: pan   wheel: zoom");
            ui.label("Q/E: rotate camera   left click: move camera");
        });
}

fn camera_section(ui: &mut egui::Ui, state: &mut CoverageState) {
    if state.scene().cameras.is_empty() {
        ui.label("No cameras in scene.");
        return;
    }

    let mut selected = state.selected();
    let selected_name = state.scene().cameras[selected].name.clone();
    egui::ComboBox::from_label("Camera")
        .selected_text(selected_name)
        .show_ui(ui, |ui| {
            for (i, camera) in state.scene().cameras.iter().enumerate() {
                ui.selectable_value(&mut selected, i, camera.name.as_str());
            }
        });
    state.select(selected);

    let mut changed = false;
    if let Some(camera) = state.scene_mut().cameras.get_mut(selected) {
        changed |= ui
            .add(egui::Slider::new(&mut camera.rotation_offset_degrees, 0.0..=360.0).text("Camera offset (°)"))
            .changed();
        if camera.link.is_some() {
            ui.label("Placed from linked model");
        }
    }
    if changed {
        state.mark_dirty();
    }
}

fn settings_section(ui: &mut egui::Ui, state: &mut CoverageState) {
    let mut changed = false;
    let settings = &mut state.scene_mut().settings;

    changed |= ui
        .add(egui::Slider::new(&mut settings.fov_angle_degrees, 1.0..=360.0).text("FOV angle (°)"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut settings.rotation_degrees, -360.0..=360.0).text("Rotation (°)"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut settings.max_distance_m, 0.0..=MAX_DISTANCE_M).text("Max distance (m)"))
        .changed();

    ui.label("Preset rotation");
    ui.horizontal(|ui| {
        for preset in PRESET_ROTATIONS {
            changed |= ui
                .radio_value(&mut settings.preset_rotation, preset, format!("{preset}°"))
                .changed();
        }
    });

    if changed {
        state.mark_dirty();
    }
}

fn dori_section(ui: &mut egui::Ui, state: &mut CoverageState, panel: &mut PanelState) {
    ui.horizontal(|ui| {
        ui.label("Horizontal resolution (px)");
        ui.add(egui::DragValue::new(&mut panel.horizontal_resolution).speed(10.0).clamp_range(1.0..=16384.0));
    });

    let fov = state.scene().settings.fov_angle_degrees;
    match dori_distances(panel.horizontal_resolution, fov) {
        Ok(distances) => {
            let mut use_distance = None;
            for (class, meters) in distances.as_array() {
                ui.horizontal(|ui| {
                    ui.label(format!("{class}: {meters:.1} m"));
                    if ui.small_button("use").clicked() {
                        use_distance = Some(meters);
                    }
                });
            }
            if let Some(meters) = use_distance {
                state.scene_mut().settings.max_distance_m = slider_distance(meters);
                state.mark_dirty();
            }
        }
        Err(e) => {
            ui.colored_label(egui::Color32::LIGHT_RED, e.to_string());
        }
    }
}

/// A DORI distance as the slider can show it.
fn slider_distance(meters: f64) -> f64 {
    meters.clamp(0.0, MAX_DISTANCE_M)
}

fn stats_section(ui: &mut egui::Ui, state: &CoverageState) {
    if let Some(error) = state.last_error() {
        ui.colored_label(egui::Color32::LIGHT_RED, error);
        return;
    }
    ui.label(format!("Boundary lines: {}", state.obstructions().len()));
    if let Some(coverage) = state.coverage().get(state.selected()) {
        let area_m2 = coverage.polygon.area() * fov_magic::units::METERS_PER_FOOT.powi(2);
        ui.label(format!("Points: {}", coverage.polygon.len()));
        ui.label(format!("Covered area: {area_m2:.1} m²"));
        if coverage.polygon.is_degenerate() {
            ui.colored_label(egui::Color32::YELLOW, "Coverage is degenerate");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dori_distance_stays_within_the_slider() {
        // 16384 px over a 1 degree cone detects far past the slider's end
        let far = dori_distances(16384.0, 1.0).unwrap().detection;
        assert!(far > MAX_DISTANCE_M);
        assert_eq!(slider_distance(far), MAX_DISTANCE_M);
        assert_eq!(slider_distance(48.9), 48.9);
    }
}
