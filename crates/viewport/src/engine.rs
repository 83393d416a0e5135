//! Narrow capability interface over the external base-map engine.
//!
//! The real engine is a large third-party renderer with a loosely typed
//! surface; everything the controller needs from it fits in the
//! [`MapEngine`] trait below. The controller owns the boxed handle
//! exclusively — nothing else in the application may touch the engine.
//!
//! Engine notifications arrive as [`EngineEvent`]s drained via
//! `poll_events` once per frame, which keeps the whole lifecycle
//! single-threaded and cooperatively scheduled.

use std::fmt;

use field::geo::GeoBounds;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// A complete base-map visual theme, swappable at runtime.
///
/// Switching styles destroys all custom sources and layers in the engine as
/// a side effect; the controller re-provisions after the style-data signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    NavigationNight,
    Satellite,
    Light,
    Streets,
}

/// Ordered list for the style switcher UI.
pub const ALL_STYLES: [StyleId; 4] = [
    StyleId::NavigationNight,
    StyleId::Satellite,
    StyleId::Light,
    StyleId::Streets,
];

impl StyleId {
    /// Engine style URL.
    pub fn url(self) -> &'static str {
        match self {
            Self::NavigationNight => "mapbox://styles/mapbox/navigation-night-v1",
            Self::Satellite => "mapbox://styles/mapbox/satellite-streets-v12",
            Self::Light => "mapbox://styles/mapbox/light-v11",
            Self::Streets => "mapbox://styles/mapbox/streets-v12",
        }
    }

    /// Human-readable label for the switcher.
    pub fn label(self) -> &'static str {
        match self {
            Self::NavigationNight => "Night (3D)",
            Self::Satellite => "Satellite",
            Self::Light => "Light",
            Self::Streets => "Streets",
        }
    }

    /// Display glyph for the switcher.
    pub fn icon(self) -> &'static str {
        match self {
            Self::NavigationNight => "🌙",
            Self::Satellite => "🛰",
            Self::Light => "☀",
            Self::Streets => "🛣",
        }
    }

    /// Dark themes get the night fog preset, light themes the day one.
    pub fn is_dark(self) -> bool {
        matches!(self, Self::NavigationNight | Self::Satellite)
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Full camera pose as reported by (and fed to) the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub lng: f64,
    pub lat: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            lng: 0.0,
            lat: 0.0,
            zoom: 0.0,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Everything needed to construct an engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub style: StyleId,
    pub camera: CameraPose,
    /// Hard pan limits.
    pub max_bounds: GeoBounds,
    pub min_zoom: f64,
    pub antialias: bool,
}

/// Constructs engine instances. The factory may fail synchronously (a
/// sandboxed host, a missing runtime asset); asynchronous failures surface
/// later as [`EngineEvent::Faulted`] before the load signal.
pub trait EngineFactory: Send + Sync {
    fn construct(&mut self, config: &EngineConfig) -> Result<Box<dyn MapEngine>, ConstructError>;
}

/// A synchronous engine-construction failure, message verbatim from the
/// engine.
#[derive(Debug, Clone)]
pub struct ConstructError(pub String);

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine construction failed: {}", self.0)
    }
}

impl std::error::Error for ConstructError {}

// ---------------------------------------------------------------------------
// Events and operation errors
// ---------------------------------------------------------------------------

/// Notifications from the engine, drained each frame in arrival order.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The engine finished its initial load and can accept layer work.
    Loaded,
    /// A new style finished loading after a `set_style` call.
    StyleData,
    /// The camera moved (pan, zoom, rotate, or fly-to progress).
    Moved(CameraPose),
    /// A runtime fault, message verbatim from the engine.
    Faulted(String),
}

/// A rejected engine operation (duplicate source id, unknown layer, ...).
#[derive(Debug, Clone)]
pub struct EngineError(pub String);

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine rejected operation: {}", self.0)
    }
}

impl std::error::Error for EngineError {}

// ---------------------------------------------------------------------------
// The capability trait
// ---------------------------------------------------------------------------

/// The only engine surface the controller is allowed to use.
pub trait MapEngine: Send + Sync {
    /// Register a GeoJSON source. Re-adding an existing id is an error —
    /// callers check `has_source` first.
    fn add_source(&mut self, id: &str, data: Value) -> Result<(), EngineError>;
    fn has_source(&self, id: &str) -> bool;

    /// Add a layer, optionally inserting before an existing layer id.
    /// Re-adding an existing id is an error — callers check `has_layer`.
    fn add_layer(&mut self, spec: Value, before: Option<&str>) -> Result<(), EngineError>;
    fn has_layer(&self, id: &str) -> bool;

    fn set_layout_property(&mut self, layer: &str, name: &str, value: Value)
        -> Result<(), EngineError>;
    fn set_paint_property(&mut self, layer: &str, name: &str, value: Value)
        -> Result<(), EngineError>;

    /// Swap the base style. Destroys all custom sources and layers; a
    /// [`EngineEvent::StyleData`] follows when the new style is usable.
    fn set_style(&mut self, style: StyleId) -> Result<(), EngineError>;

    fn set_fog(&mut self, fog: Value) -> Result<(), EngineError>;

    /// Animate the camera to `pose` over `duration_ms`. A new call replaces
    /// any in-flight animation.
    fn fly_to(&mut self, pose: CameraPose, duration_ms: u32) -> Result<(), EngineError>;

    /// Id of the first symbol (label) layer in the current base style, used
    /// as the insertion anchor for the building extrusions.
    fn label_anchor_layer(&self) -> Option<String>;

    fn camera(&self) -> CameraPose;

    /// Drain pending notifications in arrival order.
    fn poll_events(&mut self) -> Vec<EngineEvent>;

    /// Release the engine. Best-effort: implementations must not panic, and
    /// must tolerate being called on an already half-dead engine.
    fn remove(&mut self);
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
