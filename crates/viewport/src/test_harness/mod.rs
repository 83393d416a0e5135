//! # TestViewer — headless integration harness for the viewer
//!
//! Wraps `bevy::app::App` + the real field and viewport plugins, backed by
//! the in-memory engine, for integration tests without a window or
//! renderer. Builder methods drive the same events the panel UI sends.

use std::sync::{Arc, Mutex, MutexGuard};

use bevy::app::App;
use bevy::prelude::*;

use field::{FieldPlugin, FieldSeed};

use crate::controller::Phase;
use crate::engine::StyleId;
use crate::plugin::{
    AnalysisModeSet, CameraReadout, EngineBackend, LandmarkSelected, RetryRequested,
    StyleSelected, Viewer, ViewportPlugin,
};
use crate::sim_engine::{FactoryLog, SimEngineFactory, SimProbe, SimState};

/// A headless app with the full viewer stack.
pub struct TestViewer {
    app: App,
    log: Arc<Mutex<FactoryLog>>,
}

impl Default for TestViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestViewer {
    /// Healthy default: in-memory engine, seed 7.
    pub fn new() -> Self {
        Self::with_factory(SimEngineFactory::new())
    }

    /// Use a preconfigured factory (failing construction, pre-load fault).
    pub fn with_factory(factory: SimEngineFactory) -> Self {
        let log = factory.log_handle();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(FieldSeed(7));
        app.insert_resource(EngineBackend(Box::new(factory)));
        app.add_plugins((FieldPlugin, ViewportPlugin));
        // First update runs Startup (synthesis + construction) and one
        // Update pass (the load signal is pumped).
        app.update();
        Self { app, log }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn select_style(&mut self, style: StyleId) {
        self.app.world_mut().send_event(StyleSelected(style));
        self.tick();
    }

    pub fn set_analysis(&mut self, analysis: bool) {
        self.app.world_mut().send_event(AnalysisModeSet(analysis));
        self.tick();
    }

    pub fn select_landmark(&mut self, index: usize) {
        self.app.world_mut().send_event(LandmarkSelected(index));
        self.tick();
    }

    pub fn retry(&mut self) {
        self.app.world_mut().send_event(RetryRequested);
        self.tick();
    }

    /// Swap the engine backend used for the next (re-)initialization.
    pub fn swap_backend(&mut self, factory: SimEngineFactory) {
        self.log = factory.log_handle();
        self.app
            .world_mut()
            .insert_resource(EngineBackend(Box::new(factory)));
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn viewer(&self) -> &Viewer {
        self.app.world().resource::<Viewer>()
    }

    pub fn phase(&self) -> Phase {
        self.viewer().controller.phase()
    }

    pub fn camera_readout(&self) -> CameraReadout {
        *self.app.world().resource::<CameraReadout>()
    }

    /// How many engines the current backend constructed.
    pub fn constructed(&self) -> u32 {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .constructed
    }

    /// Probe of the most recently constructed engine. Panics if none was
    /// constructed — tests that expect a construction failure should not
    /// call this.
    pub fn probe(&self) -> SimProbe {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .probes
            .last()
            .cloned()
            .expect("no engine was constructed")
    }
}

/// Lock a probe, recovering from poisoning (a prior test panic must not
/// cascade).
pub fn lock(probe: &SimProbe) -> MutexGuard<'_, SimState> {
    probe.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
