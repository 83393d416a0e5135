//! Bevy integration for the viewer.
//!
//! The host UI talks to the controller exclusively through events
//! (style/mode/landmark/retry) and reads back a camera readout resource.
//! One pump system drains engine events every frame, after the handlers,
//! so an operation and its engine reaction land in the same frame.

use bevy::prelude::*;
use field::FieldCollection;

use crate::controller::{Phase, RenderController};
use crate::engine::{EngineFactory, StyleId};
use crate::landmarks::{default_engine_config, LANDMARKS};
use crate::sim_engine::SimEngineFactory;
use crate::sources::SourceDocs;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The user picked a base style.
#[derive(Event, Debug, Clone, Copy)]
pub struct StyleSelected(pub StyleId);

/// The user set the analysis-mode flag.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnalysisModeSet(pub bool);

/// The user picked a landmark (index into [`LANDMARKS`]).
#[derive(Event, Debug, Clone, Copy)]
pub struct LandmarkSelected(pub usize);

/// The user asked for a fresh initialization attempt after a failure.
#[derive(Event, Debug, Clone, Copy)]
pub struct RetryRequested;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The live controller for the current mount.
#[derive(Resource)]
pub struct Viewer {
    pub controller: RenderController,
}

impl Drop for Viewer {
    fn drop(&mut self) {
        // Unmount: best-effort engine release, never escalates.
        self.controller.dispose();
    }
}

/// The engine factory used for (re-)initialization. Swap before adding the
/// plugin to plug in a different engine; defaults to the in-memory one.
#[derive(Resource)]
pub struct EngineBackend(pub Box<dyn EngineFactory>);

impl Default for EngineBackend {
    fn default() -> Self {
        Self(Box::new(SimEngineFactory::new()))
    }
}

/// Camera pose mirrored out of the engine for the panel readout.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraReadout(pub crate::engine::CameraPose);

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StyleSelected>()
            .add_event::<AnalysisModeSet>()
            .add_event::<LandmarkSelected>()
            .add_event::<RetryRequested>()
            .init_resource::<EngineBackend>()
            .init_resource::<CameraReadout>()
            .add_systems(Startup, initialize_viewer)
            .add_systems(
                Update,
                (
                    handle_retry,
                    handle_style_selected,
                    handle_analysis_toggle,
                    handle_landmark_selected,
                    pump_engine,
                    sync_camera_readout,
                )
                    .chain(),
            );
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Build and initialize a controller against the current backend.
fn make_viewer(backend: &mut EngineBackend, field: Option<&FieldCollection>) -> Viewer {
    let sources = match field {
        Some(field) => SourceDocs::from_field(field),
        None => {
            warn!("no land-value field available, starting without overlay data");
            SourceDocs::empty()
        }
    };
    let config = default_engine_config();
    let mut controller = RenderController::new(sources, config.style, config.camera);
    controller.initialize(backend.0.as_mut(), &config);
    Viewer { controller }
}

fn initialize_viewer(
    mut commands: Commands,
    mut backend: ResMut<EngineBackend>,
    field: Option<Res<FieldCollection>>,
) {
    commands.insert_resource(make_viewer(&mut backend, field.as_deref()));
}

/// A retry swaps in a whole new controller instance — construction stays
/// at-most-once per instance.
fn handle_retry(
    mut viewer: Option<ResMut<Viewer>>,
    mut backend: ResMut<EngineBackend>,
    field: Option<Res<FieldCollection>>,
    mut events: EventReader<RetryRequested>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    let Some(viewer) = viewer.as_mut() else {
        return;
    };
    if viewer.controller.phase() != Phase::Errored {
        return;
    }
    info!("retrying map initialization with a fresh engine");
    viewer.controller.dispose();
    **viewer = make_viewer(&mut backend, field.as_deref());
}

fn handle_style_selected(
    mut viewer: Option<ResMut<Viewer>>,
    mut events: EventReader<StyleSelected>,
) {
    let Some(viewer) = viewer.as_mut() else {
        events.clear();
        return;
    };
    for event in events.read() {
        viewer.controller.set_style(event.0);
    }
}

fn handle_analysis_toggle(
    mut viewer: Option<ResMut<Viewer>>,
    mut events: EventReader<AnalysisModeSet>,
) {
    let Some(viewer) = viewer.as_mut() else {
        events.clear();
        return;
    };
    for event in events.read() {
        viewer.controller.set_analysis_mode(event.0);
    }
}

fn handle_landmark_selected(
    mut viewer: Option<ResMut<Viewer>>,
    mut events: EventReader<LandmarkSelected>,
) {
    let Some(viewer) = viewer.as_mut() else {
        events.clear();
        return;
    };
    for event in events.read() {
        match LANDMARKS.get(event.0) {
            Some(landmark) => viewer.controller.fly_to(landmark.camera()),
            None => warn!("landmark index {} out of range", event.0),
        }
    }
}

fn pump_engine(mut viewer: Option<ResMut<Viewer>>) {
    if let Some(viewer) = viewer.as_mut() {
        viewer.controller.pump();
    }
}

fn sync_camera_readout(viewer: Option<Res<Viewer>>, mut readout: ResMut<CameraReadout>) {
    let Some(viewer) = viewer else {
        return;
    };
    let pose = viewer.controller.camera();
    if readout.0 != pose {
        readout.0 = pose;
    }
}
