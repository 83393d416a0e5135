use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod control_panel;
pub mod status_overlay;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_night_theme)
            .add_systems(
                Update,
                (
                    control_panel::control_panel_ui,
                    status_overlay::status_overlay_ui,
                ),
            );
    }
}
