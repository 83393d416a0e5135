//! Source/layer catalog: ids, layer specifications, and fog presets.
//!
//! Layer specs are plain engine JSON documents. Overlay layers start with
//! `visibility: none`; the active visual mode decides what actually shows.
//! Paint properties that differ between modes live in [`crate::modes`],
//! not here.

use serde_json::{json, Value};

use crate::engine::StyleId;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

pub const SOURCE_SAMPLES: &str = "land-value-samples";
pub const SOURCE_FACILITIES: &str = "facility-points";
pub const SOURCE_ZONES: &str = "influence-zones";

pub const LAYER_BUILDINGS: &str = "3d-buildings";
pub const LAYER_HEAT: &str = "land-value-heat";
pub const LAYER_LABELS: &str = "land-value-labels";
pub const LAYER_ZONE_FILL: &str = "influence-zone-fill";
pub const LAYER_ZONE_LINE: &str = "influence-zone-outline";
pub const LAYER_FACILITIES: &str = "facility-markers";

/// Overlay layers whose visibility tracks the analysis mode.
pub const OVERLAY_LAYERS: [&str; 5] = [
    LAYER_HEAT,
    LAYER_ZONE_FILL,
    LAYER_ZONE_LINE,
    LAYER_FACILITIES,
    LAYER_LABELS,
];

// ---------------------------------------------------------------------------
// Layer specifications
// ---------------------------------------------------------------------------

/// 3D building extrusions from the base style's composite building data.
/// Inserted beneath the first symbol layer so street labels stay readable.
/// Mode-dependent paint is applied separately after insertion.
pub fn building_layer() -> Value {
    json!({
        "id": LAYER_BUILDINGS,
        "source": "composite",
        "source-layer": "building",
        "filter": ["==", "extrude", "true"],
        "type": "fill-extrusion",
        "minzoom": 13,
        "paint": {
            "fill-extrusion-opacity": 0.9
        }
    })
}

/// The overlay layers in paint order (heat lowest, labels on top), each
/// hidden until a mode shows it.
pub fn overlay_layers() -> Vec<(&'static str, Value)> {
    vec![
        (LAYER_HEAT, heat_layer()),
        (LAYER_ZONE_FILL, zone_fill_layer()),
        (LAYER_ZONE_LINE, zone_line_layer()),
        (LAYER_FACILITIES, facility_layer()),
        (LAYER_LABELS, label_layer()),
    ]
}

fn heat_layer() -> Value {
    json!({
        "id": LAYER_HEAT,
        "type": "heatmap",
        "source": SOURCE_SAMPLES,
        "layout": { "visibility": "none" },
        "paint": {
            "heatmap-weight": ["get", "weight"],
            "heatmap-intensity": ["interpolate", ["linear"], ["zoom"], 10, 0.6, 15, 1.4],
            "heatmap-radius": ["interpolate", ["linear"], ["zoom"], 10, 14, 15, 36],
            "heatmap-color": [
                "interpolate", ["linear"], ["heatmap-density"],
                0.0, "rgba(33, 102, 172, 0)",
                0.2, "rgb(103, 169, 207)",
                0.4, "rgb(209, 229, 240)",
                0.6, "rgb(253, 219, 199)",
                0.8, "rgb(239, 138, 98)",
                1.0, "rgb(178, 24, 43)"
            ],
            "heatmap-opacity": 0.75
        }
    })
}

fn zone_fill_layer() -> Value {
    json!({
        "id": LAYER_ZONE_FILL,
        "type": "fill",
        "source": SOURCE_ZONES,
        "layout": { "visibility": "none" },
        "paint": {
            "fill-color": ["get", "color"],
            "fill-opacity": 0.08
        }
    })
}

fn zone_line_layer() -> Value {
    json!({
        "id": LAYER_ZONE_LINE,
        "type": "line",
        "source": SOURCE_ZONES,
        "layout": { "visibility": "none" },
        "paint": {
            "line-color": ["get", "color"],
            "line-width": 1.5,
            "line-dasharray": [2, 2],
            "line-opacity": 0.6
        }
    })
}

fn facility_layer() -> Value {
    json!({
        "id": LAYER_FACILITIES,
        "type": "circle",
        "source": SOURCE_FACILITIES,
        "layout": { "visibility": "none" },
        "paint": {
            "circle-color": ["get", "color"],
            "circle-radius": ["interpolate", ["linear"], ["zoom"], 11, 4, 16, 9],
            "circle-stroke-color": "#ffffff",
            "circle-stroke-width": 1.5
        }
    })
}

fn label_layer() -> Value {
    json!({
        "id": LAYER_LABELS,
        "type": "symbol",
        "source": SOURCE_SAMPLES,
        "minzoom": 14,
        "layout": {
            "visibility": "none",
            "text-field": ["get", "label"],
            "text-size": 11,
            "text-allow-overlap": false
        },
        "paint": {
            "text-color": "#ffd166",
            "text-halo-color": "rgba(0, 0, 0, 0.8)",
            "text-halo-width": 1.2
        }
    })
}

// ---------------------------------------------------------------------------
// Fog
// ---------------------------------------------------------------------------

/// Atmosphere preset per style theme: deep blue haze at night and over
/// satellite imagery, white haze for the light themes.
pub fn fog_for_style(style: StyleId) -> Value {
    if style.is_dark() {
        json!({
            "range": [0.8, 8],
            "color": "#242b4b",
            "horizon-blend": 0.1
        })
    } else {
        json!({
            "range": [0.5, 10],
            "color": "#ffffff",
            "horizon-blend": 0.2
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
