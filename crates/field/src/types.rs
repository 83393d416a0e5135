//! Domain model for the synthesized land-value field.
//!
//! All of these are produced once by [`crate::synth::synthesize_field`] and
//! never mutated afterwards; the viewer treats the whole collection as an
//! opaque read-only data source.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

// ---------------------------------------------------------------------------
// Inputs: attractors and facilities
// ---------------------------------------------------------------------------

/// An economic centre exerting distance-decayed price influence.
///
/// Influence on a point is `base_price * exp(-decay_rate * distance_km)`.
/// Multiple attractors combine by taking the maximum influence, not the sum:
/// the closest dominant centre wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attractor {
    pub location: GeoPoint,
    /// Price per square metre at the centre itself. Must be positive.
    pub base_price: f64,
    /// Exponential falloff per kilometre. Must be positive.
    pub decay_rate: f64,
}

impl Attractor {
    /// Price influence at `distance_km` from the centre.
    pub fn influence_at(&self, distance_km: f64) -> f64 {
        self.base_price * (-self.decay_rate * distance_km).exp()
    }
}

/// Category of a point amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityKind {
    Hospital,
    School,
    Government,
}

impl FacilityKind {
    /// Human-readable label for panels and feature properties.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::School => "School",
            Self::Government => "Government",
        }
    }
}

/// A point amenity adding a radius-bounded bonus to nearby samples.
///
/// The bonus decays linearly from `boost` at the facility to zero at
/// `radius_km`; points outside the radius get nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub kind: FacilityKind,
    pub location: GeoPoint,
    /// Bonus at zero distance. Must be positive.
    pub boost: f64,
    /// Influence radius in kilometres. Must be positive.
    pub radius_km: f64,
    /// Display color (CSS hex) for markers and influence zones.
    pub color: String,
    /// Display glyph for markers.
    pub icon: String,
}

impl Facility {
    /// Additive price bonus at `distance_km` from the facility.
    pub fn bonus_at(&self, distance_km: f64) -> f64 {
        if distance_km >= self.radius_km {
            return 0.0;
        }
        self.boost * (1.0 - distance_km / self.radius_km)
    }
}

// ---------------------------------------------------------------------------
// Outputs: samples, zones, and the full collection
// ---------------------------------------------------------------------------

/// One synthesized field point. Derived, never mutated after creation.
#[derive(Debug, Clone)]
pub struct ValueSample {
    pub location: GeoPoint,
    /// Final price per square metre after bonuses and noise.
    pub price: f64,
    /// `min(price, cap) / cap`, used as heatmap intensity. Always in [0, 1].
    pub normalized_weight: f64,
    /// Display label, e.g. `¥8.5万`.
    pub formatted_label: String,
}

/// A closed ring approximating the circle of influence around one facility.
///
/// Invariant: the first and last vertex are identical.
#[derive(Debug, Clone)]
pub struct InfluenceZone {
    pub facility_name: String,
    pub kind: FacilityKind,
    pub color: String,
    pub boost: f64,
    pub ring: Vec<GeoPoint>,
}

/// The immutable result of one synthesis run.
#[derive(Debug, Clone, Resource)]
pub struct FieldCollection {
    pub samples: Vec<ValueSample>,
    pub facilities: Vec<Facility>,
    pub zones: Vec<InfluenceZone>,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attractor_influence_at_centre_is_base_price() {
        let a = Attractor {
            location: GeoPoint::new(120.21, 30.24),
            base_price: 90_000.0,
            decay_rate: 0.4,
        };
        assert!((a.influence_at(0.0) - 90_000.0).abs() < 1e-9);
    }

    #[test]
    fn attractor_influence_decays_exponentially() {
        let a = Attractor {
            location: GeoPoint::new(120.21, 30.24),
            base_price: 90_000.0,
            decay_rate: 0.4,
        };
        // 5 km out: 90000 * e^-2 ≈ 12180.9
        let v = a.influence_at(5.0);
        assert!((v - 90_000.0 * (-2.0f64).exp()).abs() < 1e-6);
        assert!((12_150.0..12_210.0).contains(&v), "unexpected influence: {v}");
    }

    #[test]
    fn facility_bonus_is_linear_and_radius_bounded() {
        let f = Facility {
            name: "Test Hospital".into(),
            kind: FacilityKind::Hospital,
            location: GeoPoint::new(120.18, 30.25),
            boost: 15_000.0,
            radius_km: 2.0,
            color: "#3b82f6".into(),
            icon: "H".into(),
        };
        assert!((f.bonus_at(0.0) - 15_000.0).abs() < 1e-9);
        assert!((f.bonus_at(1.0) - 7_500.0).abs() < 1e-9);
        assert_eq!(f.bonus_at(2.0), 0.0);
        assert_eq!(f.bonus_at(2.5), 0.0);
    }

    #[test]
    fn facility_kind_labels_are_non_empty() {
        for kind in [FacilityKind::Hospital, FacilityKind::School, FacilityKind::Government] {
            assert!(!kind.label().is_empty());
        }
    }
}
