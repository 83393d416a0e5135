//! Procedural land-value field for the Hangzhou viewer.
//!
//! The plugin synthesizes the whole field once at startup from static
//! configuration and a seed, and inserts the resulting [`FieldCollection`]
//! resource. Nothing here is reactive: a changed configuration means a
//! fresh synthesis run, never an incremental update.

use bevy::prelude::*;

pub mod config;
pub mod dataset;
pub mod geo;
pub mod geojson;
pub mod rng;
pub mod synth;
pub mod types;

pub use config::{ConfigError, ExclusionRegion, FieldConfig};
pub use rng::{FieldRng, DEFAULT_SEED};
pub use types::{Attractor, Facility, FacilityKind, FieldCollection, InfluenceZone, ValueSample};

/// Seed for the synthesis RNG. Insert before [`FieldPlugin`] runs to get a
/// reproducible non-default city.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FieldSeed(pub u64);

impl Default for FieldSeed {
    fn default() -> Self {
        Self(DEFAULT_SEED)
    }
}

/// Synthesizes the land-value field at startup.
pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldSeed>()
            // PreStartup so the collection exists before the viewer's own
            // Startup initialization looks for it.
            .add_systems(PreStartup, build_field);
    }
}

/// Validate the static configuration and synthesize the collection.
///
/// A validation failure leaves the resource absent; downstream consumers
/// treat a missing collection as "no overlay data".
fn build_field(mut commands: Commands, seed: Res<FieldSeed>) {
    let config = dataset::hangzhou_config();
    if let Err(e) = config.validate() {
        error!("invalid field configuration, no land-value data: {e}");
        return;
    }

    let mut rng = FieldRng::from_seed_u64(seed.0);
    let field = synth::synthesize_field(&config, &mut rng.0);
    info!(
        "synthesized land-value field: {} samples, {} facilities, {} zones (seed {})",
        field.samples.len(),
        field.facilities.len(),
        field.zones.len(),
        seed.0
    );
    commands.insert_resource(field);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_inserts_the_field_collection() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(FieldPlugin);
        app.update();
        let field = app.world().get_resource::<FieldCollection>();
        assert!(field.is_some());
        assert!(!field.unwrap().samples.is_empty());
    }

    #[test]
    fn seed_resource_controls_the_output() {
        let run = |seed: u64| {
            let mut app = App::new();
            app.add_plugins(MinimalPlugins);
            app.insert_resource(FieldSeed(seed));
            app.add_plugins(FieldPlugin);
            app.update();
            let field = app.world().resource::<FieldCollection>();
            field.samples.iter().map(|s| s.price).collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
        assert_ne!(run(9), run(10));
    }
}
