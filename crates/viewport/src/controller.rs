//! The render-layer orchestration controller.
//!
//! A four-state lifecycle machine owning the engine handle exclusively:
//!
//! ```text
//! Uninitialized → Initializing → Ready → Disposed
//!                      │           │
//!                      └───────────┴──→ Errored
//! ```
//!
//! Two orthogonal knobs ride on top of the lifecycle: the analysis flag
//! (which visual mode paints the map) and the current base style. Both are
//! plain recorded state; every engine-facing effect is derived from them by
//! re-running the same declarative apply steps, so repeating an operation
//! is always harmless.
//!
//! Style switching is the one genuinely ordering-sensitive path: the engine
//! destroys all custom sources/layers on `set_style` and only accepts layer
//! work again after its style-data signal. A pending counter tracks how
//! many switches are in flight; re-provisioning runs only when the signal
//! for the *latest* switch arrives, so a rapid A→B sequence ends up with
//! B's layers and nothing of A's.

use bevy::prelude::*;
use serde_json::json;

use crate::engine::{CameraPose, EngineConfig, EngineEvent, EngineFactory, MapEngine, StyleId};
use crate::error::{benign_engine_noise, classify_construct_failure, ViewerError};
use crate::landmarks::FLY_TO_DURATION_MS;
use crate::layers::{self, LAYER_BUILDINGS, OVERLAY_LAYERS};
use crate::modes::ModeCatalog;
use crate::sources::SourceDocs;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initializing,
    Ready,
    Errored,
    Disposed,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the engine handle and the full render state for one mount.
///
/// Construction happens at most once per instance; a retry means a fresh
/// instance. All engine access funnels through these methods — the handle
/// is never exposed.
pub struct RenderController {
    engine: Option<Box<dyn MapEngine>>,
    phase: Phase,
    analysis_mode: bool,
    style: StyleId,
    /// Style switches whose style-data signal has not arrived yet.
    pending_style_data: u32,
    error: Option<ViewerError>,
    camera: CameraPose,
    /// Cleared on disposal; every event dispatch checks it so a late
    /// engine callback can never touch dead state.
    alive: bool,
    sources: SourceDocs,
    modes: ModeCatalog,
}

impl RenderController {
    pub fn new(sources: SourceDocs, style: StyleId, camera: CameraPose) -> Self {
        Self {
            engine: None,
            phase: Phase::Uninitialized,
            analysis_mode: false,
            style,
            pending_style_data: 0,
            error: None,
            camera,
            alive: true,
            sources,
            modes: ModeCatalog::builtin(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn error(&self) -> Option<&ViewerError> {
        self.error.as_ref()
    }

    pub fn analysis_mode(&self) -> bool {
        self.analysis_mode
    }

    pub fn style(&self) -> StyleId {
        self.style
    }

    /// Last camera pose reported by the engine.
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Construct the engine. Runs at most once per controller instance:
    /// any call after the first — including during an in-flight
    /// initialization — is ignored, not queued.
    pub fn initialize(&mut self, factory: &mut dyn EngineFactory, config: &EngineConfig) {
        if self.phase != Phase::Uninitialized {
            return;
        }
        self.phase = Phase::Initializing;
        self.style = config.style;
        self.camera = config.camera;

        match factory.construct(config) {
            Ok(engine) => {
                self.engine = Some(engine);
            }
            Err(e) => {
                let classified = classify_construct_failure(&e.0);
                warn!("engine construction failed: {classified}");
                self.error = Some(classified);
                self.phase = Phase::Errored;
            }
        }
    }

    /// Drain and dispatch pending engine events. Call once per frame.
    pub fn pump(&mut self) {
        if !self.alive {
            return;
        }
        let events = match self.engine.as_mut() {
            Some(engine) => engine.poll_events(),
            None => return,
        };
        for event in events {
            if !self.alive {
                break;
            }
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Loaded => {
                if self.phase != Phase::Initializing {
                    return;
                }
                self.phase = Phase::Ready;
                self.provision();
                self.apply_mode();
                self.apply_fog();
                info!("map engine ready, style {:?}", self.style);
            }
            EngineEvent::StyleData => {
                if self.phase != Phase::Ready || self.pending_style_data == 0 {
                    return;
                }
                self.pending_style_data -= 1;
                // Only the signal matching the latest switch re-provisions;
                // earlier signals are superseded.
                if self.pending_style_data == 0 {
                    self.provision();
                    self.apply_mode();
                    self.apply_fog();
                }
            }
            EngineEvent::Moved(pose) => {
                self.camera = pose;
            }
            EngineEvent::Faulted(message) => self.on_fault(message),
        }
    }

    fn on_fault(&mut self, message: String) {
        if benign_engine_noise(&message) {
            warn!("suppressing benign engine security noise: {message}");
            return;
        }
        if self.phase == Phase::Initializing {
            // The engine never reached ready; treat as a terminal load
            // failure for this mount.
            let error = ViewerError::EngineFailure { message };
            warn!("engine faulted before load: {error}");
            self.error = Some(error);
            self.phase = Phase::Errored;
        } else {
            // Post-load faults are background noise; the engine heals most
            // rendering errors on its own.
            warn!("engine fault after load (non-fatal): {message}");
        }
    }

    /// Release the engine handle. Safe to call repeatedly; the handle is
    /// released exactly once and release faults never escalate.
    pub fn dispose(&mut self) {
        self.alive = false;
        if let Some(mut engine) = self.engine.take() {
            engine.remove();
        }
        self.phase = Phase::Disposed;
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Switch the base style. The engine destroys all custom sources and
    /// layers as a side effect; re-provisioning is deferred until the
    /// engine's style-data signal for this switch arrives.
    pub fn set_style(&mut self, style: StyleId) {
        self.style = style;
        if self.phase != Phase::Ready {
            // Recorded only; styling outside Ready is meaningless to the
            // engine and the recorded value drives the next Ready entry.
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.set_style(style) {
            Ok(()) => self.pending_style_data += 1,
            Err(e) => warn!("style switch abandoned: {e}"),
        }
    }

    /// Set the analysis flag. Declarative and idempotent: the flag is
    /// always recorded, and when the engine is ready the matching visual
    /// mode is (re-)applied in full. Before ready this is a safe no-op on
    /// the engine; the flag takes effect on Ready entry.
    pub fn set_analysis_mode(&mut self, analysis: bool) {
        self.analysis_mode = analysis;
        if self.phase == Phase::Ready {
            self.apply_mode();
        }
    }

    /// Fly the camera to a landmark pose. Fire-and-forget: a concurrent
    /// request replaces the in-flight animation, nothing is queued.
    pub fn fly_to(&mut self, pose: CameraPose) {
        if self.phase != Phase::Ready {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(e) = engine.fly_to(pose, FLY_TO_DURATION_MS) {
            warn!("fly-to abandoned: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Provisioning and mode application
    // -----------------------------------------------------------------------

    /// Idempotently (re-)register all custom sources and layers. Anything
    /// already present is skipped silently; individual rejections are
    /// logged and skipped, never escalated.
    fn provision(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        for (id, doc) in self.sources.entries() {
            if engine.has_source(id) {
                continue;
            }
            if let Err(e) = engine.add_source(id, doc.clone()) {
                warn!("source '{id}' not provisioned: {e}");
            }
        }

        if !engine.has_layer(LAYER_BUILDINGS) {
            // Slot the extrusions beneath the base style's first label
            // layer so street names render on top of rooftops.
            let anchor = engine.label_anchor_layer();
            if let Err(e) = engine.add_layer(layers::building_layer(), anchor.as_deref()) {
                warn!("building layer not provisioned: {e}");
            }
        }

        for (id, spec) in layers::overlay_layers() {
            if engine.has_layer(id) {
                continue;
            }
            if let Err(e) = engine.add_layer(spec, None) {
                warn!("overlay layer '{id}' not provisioned: {e}");
            }
        }
    }

    /// Apply the visual mode matching the current analysis flag: building
    /// paint properties plus overlay visibility. Running this twice with
    /// the same flag writes the same values — the invariant that overlay
    /// visibility always matches the flag holds after every operation.
    fn apply_mode(&mut self) {
        let Some(mode) = self.modes.for_analysis(self.analysis_mode).cloned() else {
            return;
        };
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        for (name, value) in &mode.building_paint {
            if let Err(e) = engine.set_paint_property(LAYER_BUILDINGS, name, value.clone()) {
                warn!("paint '{name}' not applied: {e}");
            }
        }

        let visibility = if mode.overlays_visible { "visible" } else { "none" };
        for id in OVERLAY_LAYERS {
            if let Err(e) = engine.set_layout_property(id, "visibility", json!(visibility)) {
                warn!("visibility of '{id}' not applied: {e}");
            }
        }
    }

    /// Apply the fog preset for the current style.
    fn apply_fog(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(e) = engine.set_fog(layers::fog_for_style(self.style)) {
            warn!("fog not applied: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
