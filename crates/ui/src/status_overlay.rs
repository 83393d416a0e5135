//! Centered chrome for the two non-interactive viewer states: the startup
//! spinner and the initialization-failure card.
//!
//! The failure card distinguishes the two error classes: a sandbox
//! restriction gets the "open outside this frame" remedy with no retry
//! loop, a transient engine failure gets a Retry button.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use viewport::{Phase, RetryRequested, Viewer};

pub fn status_overlay_ui(
    mut contexts: EguiContexts,
    viewer: Option<Res<Viewer>>,
    mut retry_events: EventWriter<RetryRequested>,
) {
    let Some(viewer) = viewer else {
        return;
    };
    let ctx = contexts.ctx_mut();

    match viewer.controller.phase() {
        Phase::Initializing => {
            egui::Window::new("engine_loading")
                .title_bar(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Initializing 3D engine…");
                    });
                });
        }
        Phase::Errored => {
            let Some(error) = viewer.controller.error() else {
                return;
            };
            egui::Window::new("Map initialization failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .default_width(360.0)
                .show(ctx, |ui| {
                    ui.label(error.to_string());
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(error.remedy()).small());
                    ui.add_space(6.0);
                    if error.is_retryable() && ui.button("Retry loading").clicked() {
                        retry_events.send(RetryRequested);
                    }
                });
        }
        _ => {}
    }
}
