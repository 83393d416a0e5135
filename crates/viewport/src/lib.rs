//! Render-layer orchestration for the Hangzhou land-value viewer.
//!
//! The external base-map engine is consumed through the narrow
//! [`MapEngine`] capability trait; [`RenderController`] owns the handle and
//! runs the whole lifecycle — fault-contained construction, idempotent
//! source/layer provisioning, sequenced style switching, data-driven visual
//! modes, camera fly-to, and best-effort teardown.

pub mod controller;
pub mod engine;
pub mod error;
pub mod landmarks;
pub mod layers;
pub mod modes;
pub mod plugin;
pub mod sim_engine;
pub mod sources;

#[cfg(test)]
pub mod test_harness;

pub use controller::{Phase, RenderController};
pub use engine::{
    CameraPose, ConstructError, EngineConfig, EngineError, EngineEvent, EngineFactory, MapEngine,
    StyleId, ALL_STYLES,
};
pub use error::ViewerError;
pub use landmarks::{Landmark, LANDMARKS};
pub use plugin::{
    AnalysisModeSet, CameraReadout, EngineBackend, LandmarkSelected, RetryRequested, StyleSelected,
    Viewer, ViewportPlugin,
};
pub use sim_engine::{SimEngine, SimEngineFactory};
pub use sources::SourceDocs;
