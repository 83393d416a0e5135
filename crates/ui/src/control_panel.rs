//! Left control panel: live camera readout, landmark list, style switcher,
//! and the analysis-mode toggle.
//!
//! The panel never touches the controller directly — every interaction is
//! an event the viewport plugin handles.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use viewport::engine::CameraPose;
use viewport::{
    AnalysisModeSet, CameraReadout, LandmarkSelected, StyleSelected, Viewer, ALL_STYLES, LANDMARKS,
};

/// Camera readout cells, in grid order: lng, lat, pitch, bearing.
pub fn readout_lines(pose: CameraPose) -> [String; 4] {
    [
        format!("LNG {:.4}", pose.lng),
        format!("LAT {:.4}", pose.lat),
        format!("PITCH {:.0}°", pose.pitch),
        format!("BEARING {:.0}°", pose.bearing),
    ]
}

pub fn control_panel_ui(
    mut contexts: EguiContexts,
    viewer: Option<Res<Viewer>>,
    readout: Res<CameraReadout>,
    mut style_events: EventWriter<StyleSelected>,
    mut mode_events: EventWriter<AnalysisModeSet>,
    mut landmark_events: EventWriter<LandmarkSelected>,
) {
    let ctx = contexts.ctx_mut();

    egui::SidePanel::left("control_panel")
        .resizable(false)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("杭州 3D Land Value");
            ui.label("Explore Hangzhou's districts and synthetic land prices in 3D.");
            ui.add_space(4.0);

            // --- Camera readout ---
            let lines = readout_lines(readout.0);
            egui::Grid::new("camera_readout")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.monospace(lines[0].as_str());
                    ui.monospace(lines[1].as_str());
                    ui.end_row();
                    ui.monospace(lines[2].as_str());
                    ui.monospace(lines[3].as_str());
                    ui.end_row();
                });
            ui.separator();

            // --- Analysis toggle ---
            let mut analysis = viewer
                .as_ref()
                .map(|v| v.controller.analysis_mode())
                .unwrap_or(false);
            if ui
                .checkbox(&mut analysis, "Land value analysis")
                .on_hover_text("Heatmap, price labels, and facility influence zones")
                .changed()
            {
                mode_events.send(AnalysisModeSet(analysis));
            }
            ui.separator();

            // --- Landmarks ---
            ui.label(egui::RichText::new("KEY LANDMARKS").small().weak());
            for (index, landmark) in LANDMARKS.iter().enumerate() {
                let clicked = ui
                    .button(landmark.name)
                    .on_hover_text(landmark.description)
                    .clicked();
                if clicked {
                    landmark_events.send(LandmarkSelected(index));
                }
            }
            ui.separator();

            // --- Styles ---
            ui.label(egui::RichText::new("MAP STYLE").small().weak());
            let current = viewer.as_ref().map(|v| v.controller.style());
            for style in ALL_STYLES {
                let selected = current == Some(style);
                let label = format!("{} {}", style.icon(), style.label());
                if ui.selectable_label(selected, label).clicked() && !selected {
                    style_events.send(StyleSelected(style));
                }
            }
        });
}
