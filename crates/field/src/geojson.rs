//! GeoJSON encoding of a [`FieldCollection`].
//!
//! The map engine consumes plain GeoJSON documents; these builders are the
//! only bridge between the typed field model and that wire shape. Property
//! keys here are load-bearing — layer styling expressions reference them by
//! name (`weight`, `label`, `color`, ...).

use serde_json::{json, Value};

use crate::geo::GeoPoint;
use crate::types::FieldCollection;

fn point_geometry(p: GeoPoint) -> Value {
    json!({ "type": "Point", "coordinates": [p.lng, p.lat] })
}

/// FeatureCollection of value samples with `price`, `label`, and `weight`
/// properties (heatmap weight and label text come straight from here).
pub fn samples_document(field: &FieldCollection) -> Value {
    let features: Vec<Value> = field
        .samples
        .iter()
        .enumerate()
        .map(|(id, sample)| {
            json!({
                "type": "Feature",
                "id": id,
                "properties": {
                    "price": sample.price,
                    "label": sample.formatted_label,
                    "weight": sample.normalized_weight,
                },
                "geometry": point_geometry(sample.location),
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// FeatureCollection of facility points with display properties and an
/// impact summary for popups.
pub fn facilities_document(field: &FieldCollection) -> Value {
    let features: Vec<Value> = field
        .facilities
        .iter()
        .enumerate()
        .map(|(id, facility)| {
            json!({
                "type": "Feature",
                "id": format!("fac-{id}"),
                "properties": {
                    "name": facility.name,
                    "kind": facility.kind.label(),
                    "icon": facility.icon,
                    "color": facility.color,
                    "boost": facility.boost,
                    "radius": facility.radius_km,
                    "summary": format!(
                        "Impact: +¥{} within {}km",
                        facility.boost as i64, facility.radius_km
                    ),
                },
                "geometry": point_geometry(facility.location),
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// FeatureCollection of influence-zone polygons (one closed ring each).
pub fn zones_document(field: &FieldCollection) -> Value {
    let features: Vec<Value> = field
        .zones
        .iter()
        .enumerate()
        .map(|(id, zone)| {
            let ring: Vec<Value> = zone.ring.iter().map(|p| json!([p.lng, p.lat])).collect();
            json!({
                "type": "Feature",
                "id": format!("zone-{id}"),
                "properties": {
                    "name": zone.facility_name,
                    "kind": zone.kind.label(),
                    "color": zone.color,
                    "boost": zone.boost,
                },
                "geometry": { "type": "Polygon", "coordinates": [ring] },
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::rng::FieldRng;
    use crate::synth::synthesize_field;

    fn test_field() -> FieldCollection {
        synthesize_field(&dataset::hangzhou_config(), &mut FieldRng::default().0)
    }

    #[test]
    fn samples_document_has_one_feature_per_sample() {
        let field = test_field();
        let doc = samples_document(&field);
        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(doc["features"].as_array().unwrap().len(), field.samples.len());
    }

    #[test]
    fn sample_features_carry_styling_properties() {
        let field = test_field();
        let doc = samples_document(&field);
        let first = &doc["features"][0]["properties"];
        assert!(first["price"].is_number());
        assert!(first["weight"].is_number());
        assert!(first["label"].as_str().unwrap().starts_with('¥'));
    }

    #[test]
    fn facility_summary_mentions_boost_and_radius() {
        let field = test_field();
        let doc = facilities_document(&field);
        let summary = doc["features"][0]["properties"]["summary"].as_str().unwrap();
        assert!(summary.contains("15000"));
        assert!(summary.contains("2km"));
    }

    #[test]
    fn zone_polygons_are_closed_rings() {
        let field = test_field();
        let doc = zones_document(&field);
        for feature in doc["features"].as_array().unwrap() {
            let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
            assert!(ring.len() > 32);
            assert_eq!(ring.first(), ring.last());
        }
    }
}
