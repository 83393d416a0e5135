use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use field::{FieldPlugin, FieldSeed};
use ui::UiPlugin;
use viewport::ViewportPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Landlens — 杭州 3D Land Value".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((FieldPlugin, ViewportPlugin, UiPlugin));

    // Reproducible alternative fields: LANDLENS_SEED=123 landlens
    if let Ok(seed) = std::env::var("LANDLENS_SEED") {
        match seed.parse::<u64>() {
            Ok(value) => {
                app.insert_resource(FieldSeed(value));
            }
            Err(_) => warn!("ignoring non-numeric LANDLENS_SEED: {seed}"),
        }
    }

    app.run();
}
