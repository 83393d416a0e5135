use bevy_egui::{egui, EguiContexts};

/// Deep night-blue panel theme matching the default navigation-night map
/// style.
pub fn apply_night_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(16, 20, 34);
    let inactive = egui::Color32::from_rgb(30, 36, 56);
    let hover = egui::Color32::from_rgb(44, 54, 82);
    let active = egui::Color32::from_rgb(59, 130, 246);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(10, 13, 24);
    style.visuals.faint_bg_color = egui::Color32::from_rgb(22, 27, 44);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let rounding = egui::CornerRadius::same(6);
    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.noninteractive.corner_radius = rounding;
    style.visuals.widgets.inactive.corner_radius = rounding;
    style.visuals.widgets.hovered.corner_radius = rounding;
    style.visuals.widgets.active.corner_radius = rounding;

    ctx.set_style(style);
}
