//! Prepared source documents handed to the engine.
//!
//! Built once from the synthesized field; the controller re-feeds the same
//! immutable documents every time provisioning runs (initial load and after
//! every style switch).

use field::geojson;
use field::FieldCollection;
use serde_json::{json, Value};

use crate::layers::{SOURCE_FACILITIES, SOURCE_SAMPLES, SOURCE_ZONES};

/// The three GeoJSON documents backing the overlay layers.
#[derive(Debug, Clone)]
pub struct SourceDocs {
    pub samples: Value,
    pub facilities: Value,
    pub zones: Value,
}

impl SourceDocs {
    pub fn from_field(field: &FieldCollection) -> Self {
        Self {
            samples: geojson::samples_document(field),
            facilities: geojson::facilities_document(field),
            zones: geojson::zones_document(field),
        }
    }

    /// Empty collections, used when no field data is available so the map
    /// still works without overlays.
    pub fn empty() -> Self {
        let empty = json!({ "type": "FeatureCollection", "features": [] });
        Self {
            samples: empty.clone(),
            facilities: empty.clone(),
            zones: empty,
        }
    }

    /// (source id, document) pairs in provisioning order.
    pub fn entries(&self) -> [(&'static str, &Value); 3] {
        [
            (SOURCE_SAMPLES, &self.samples),
            (SOURCE_FACILITIES, &self.facilities),
            (SOURCE_ZONES, &self.zones),
        ]
    }
}
