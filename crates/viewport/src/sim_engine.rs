//! Deterministic in-memory map engine.
//!
//! Faithful to the behaviors the controller's correctness depends on:
//! duplicate source/layer registration is an error (idempotence must come
//! from the caller's existence checks), and a style switch destroys every
//! custom source and layer before signalling `StyleData`.
//!
//! The engine's internal state lives behind a shared probe so tests and
//! the demo shell can inspect what the controller actually did, while the
//! controller still holds the engine handle exclusively.

use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::engine::{
    CameraPose, ConstructError, EngineConfig, EngineError, EngineEvent, EngineFactory, MapEngine,
    StyleId,
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One layer slot. Base-style layers carry no spec; custom layers keep the
/// full document they were added with.
#[derive(Debug, Clone)]
pub struct SimLayer {
    pub id: String,
    pub kind: String,
    pub spec: Option<Value>,
}

/// The complete observable state of a [`SimEngine`].
#[derive(Debug, Default)]
pub struct SimState {
    pub style: Option<StyleId>,
    pub camera: CameraPose,
    pub sources: BTreeMap<String, Value>,
    pub layers: Vec<SimLayer>,
    pub layout_props: BTreeMap<(String, String), Value>,
    pub paint_props: BTreeMap<(String, String), Value>,
    pub fog: Option<Value>,
    /// Latest fly-to request; a new request replaces it.
    pub in_flight: Option<(CameraPose, u32)>,
    pub fly_to_count: u32,
    pub add_source_calls: u32,
    pub add_layer_calls: u32,
    pub removed: bool,
    pub queue: VecDeque<EngineEvent>,
}

impl SimState {
    /// Layers every base style ships with; the last one is the symbol layer
    /// used as the building-insertion anchor.
    fn base_layers() -> Vec<SimLayer> {
        ["land:background", "water:fill", "road-simple:line", "settlement-label:symbol"]
            .into_iter()
            .map(|entry| {
                let (id, kind) = entry.split_once(':').unwrap_or((entry, "background"));
                SimLayer {
                    id: id.to_string(),
                    kind: kind.to_string(),
                    spec: None,
                }
            })
            .collect()
    }

    fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Ids of custom (non-base) layers, in paint order.
    pub fn custom_layer_ids(&self) -> Vec<String> {
        self.layers
            .iter()
            .filter(|l| l.spec.is_some())
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn source_ids(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    /// Effective visibility of a layer: layout override, then the layer
    /// spec's own layout, then the engine default of visible.
    pub fn visibility(&self, layer: &str) -> String {
        if let Some(v) = self.layout_props.get(&(layer.to_string(), "visibility".to_string())) {
            return v.as_str().unwrap_or("visible").to_string();
        }
        self.layers
            .iter()
            .find(|l| l.id == layer)
            .and_then(|l| l.spec.as_ref())
            .and_then(|spec| spec["layout"]["visibility"].as_str())
            .unwrap_or("visible")
            .to_string()
    }

    pub fn paint(&self, layer: &str, name: &str) -> Option<&Value> {
        self.paint_props.get(&(layer.to_string(), name.to_string()))
    }
}

/// Shared handle onto a [`SimEngine`]'s state, for inspection.
pub type SimProbe = Arc<Mutex<SimState>>;

fn lock(probe: &SimProbe) -> MutexGuard<'_, SimState> {
    probe.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The in-memory engine handle given to the controller.
pub struct SimEngine {
    state: SimProbe,
}

impl SimEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let mut state = SimState {
            style: Some(config.style),
            camera: config.camera,
            layers: SimState::base_layers(),
            ..Default::default()
        };
        state.queue.push_back(EngineEvent::Loaded);
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Shared inspection handle onto this engine's state.
    pub fn probe(&self) -> SimProbe {
        Arc::clone(&self.state)
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        lock(&self.state)
    }
}

impl MapEngine for SimEngine {
    fn add_source(&mut self, id: &str, data: Value) -> Result<(), EngineError> {
        let mut state = self.state();
        state.add_source_calls += 1;
        if state.sources.contains_key(id) {
            return Err(EngineError(format!("source '{id}' already exists")));
        }
        state.sources.insert(id.to_string(), data);
        Ok(())
    }

    fn has_source(&self, id: &str) -> bool {
        self.state().sources.contains_key(id)
    }

    fn add_layer(&mut self, spec: Value, before: Option<&str>) -> Result<(), EngineError> {
        let mut state = self.state();
        state.add_layer_calls += 1;
        let id = spec["id"]
            .as_str()
            .ok_or_else(|| EngineError("layer spec has no id".to_string()))?
            .to_string();
        if state.layer_index(&id).is_some() {
            return Err(EngineError(format!("layer '{id}' already exists")));
        }
        let kind = spec["type"].as_str().unwrap_or("custom").to_string();
        let layer = SimLayer {
            id,
            kind,
            spec: Some(spec),
        };
        match before {
            Some(anchor) => {
                let index = state
                    .layer_index(anchor)
                    .ok_or_else(|| EngineError(format!("layer '{anchor}' does not exist")))?;
                state.layers.insert(index, layer);
            }
            None => state.layers.push(layer),
        }
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.state().layer_index(id).is_some()
    }

    fn set_layout_property(
        &mut self,
        layer: &str,
        name: &str,
        value: Value,
    ) -> Result<(), EngineError> {
        let mut state = self.state();
        if state.layer_index(layer).is_none() {
            return Err(EngineError(format!("layer '{layer}' does not exist")));
        }
        state
            .layout_props
            .insert((layer.to_string(), name.to_string()), value);
        Ok(())
    }

    fn set_paint_property(
        &mut self,
        layer: &str,
        name: &str,
        value: Value,
    ) -> Result<(), EngineError> {
        let mut state = self.state();
        if state.layer_index(layer).is_none() {
            return Err(EngineError(format!("layer '{layer}' does not exist")));
        }
        state
            .paint_props
            .insert((layer.to_string(), name.to_string()), value);
        Ok(())
    }

    fn set_style(&mut self, style: StyleId) -> Result<(), EngineError> {
        let mut state = self.state();
        if state.removed {
            return Err(EngineError("engine already removed".to_string()));
        }
        // A style swap rebuilds the engine's layer world from scratch.
        state.style = Some(style);
        state.layers = SimState::base_layers();
        state.sources.clear();
        state.layout_props.clear();
        state.paint_props.clear();
        state.fog = None;
        state.queue.push_back(EngineEvent::StyleData);
        Ok(())
    }

    fn set_fog(&mut self, fog: Value) -> Result<(), EngineError> {
        self.state().fog = Some(fog);
        Ok(())
    }

    fn fly_to(&mut self, pose: CameraPose, duration_ms: u32) -> Result<(), EngineError> {
        let mut state = self.state();
        state.fly_to_count += 1;
        state.in_flight = Some((pose, duration_ms));
        state.camera = pose;
        state.queue.push_back(EngineEvent::Moved(pose));
        Ok(())
    }

    fn label_anchor_layer(&self) -> Option<String> {
        self.state()
            .layers
            .iter()
            .find(|l| l.kind == "symbol")
            .map(|l| l.id.clone())
    }

    fn camera(&self) -> CameraPose {
        self.state().camera
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.state().queue.drain(..).collect()
    }

    fn remove(&mut self) {
        let mut state = self.state();
        state.removed = true;
        state.queue.clear();
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Record of every construction a factory performed.
#[derive(Debug, Default)]
pub struct FactoryLog {
    pub constructed: u32,
    pub probes: Vec<SimProbe>,
}

/// Factory for [`SimEngine`]s, configurable to fail construction or to
/// fault before the load signal.
#[derive(Default)]
pub struct SimEngineFactory {
    /// Fail `construct` synchronously with this message.
    pub fail_construct: Option<String>,
    /// Construct successfully but emit a fault instead of the load signal.
    pub fault_before_load: Option<String>,
    log: Arc<Mutex<FactoryLog>>,
}

impl SimEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(message: &str) -> Self {
        Self {
            fail_construct: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn faulting_with(message: &str) -> Self {
        Self {
            fault_before_load: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Shared handle onto the construction log; clone before handing the
    /// factory off.
    pub fn log_handle(&self) -> Arc<Mutex<FactoryLog>> {
        Arc::clone(&self.log)
    }

    /// Probe of the most recently constructed engine, if any.
    pub fn latest_probe(&self) -> Option<SimProbe> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .probes
            .last()
            .cloned()
    }
}

impl EngineFactory for SimEngineFactory {
    fn construct(&mut self, config: &EngineConfig) -> Result<Box<dyn MapEngine>, ConstructError> {
        let mut log = self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        log.constructed += 1;
        if let Some(message) = &self.fail_construct {
            return Err(ConstructError(message.clone()));
        }
        let engine = SimEngine::new(config);
        if let Some(message) = &self.fault_before_load {
            let mut state = lock(&engine.state);
            state.queue.clear();
            state.queue.push_back(EngineEvent::Faulted(message.clone()));
        }
        log.probes.push(engine.probe());
        Ok(Box::new(engine))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
