//! Static Hangzhou dataset: attractors, facilities, bounds, and tuning
//! thresholds.
//!
//! This is configuration data, not code — the synthesizer is entirely
//! driven by it, and swapping in another city means swapping this module.

use crate::config::{ExclusionRegion, FieldConfig};
use crate::geo::{GeoBounds, GeoPoint};
use crate::types::{Attractor, Facility, FacilityKind};

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// Hangzhou urban area, south-west to north-east. Used as the engine's
/// maximum pan bounds.
pub const MAP_BOUNDS: GeoBounds = GeoBounds::new(
    GeoPoint::new(119.90, 30.10),
    GeoPoint::new(120.45, 30.45),
);

/// Region covered by the sample grid. Slightly tighter than [`MAP_BOUNDS`]
/// so the field fades out before the pan limits.
pub const FIELD_BOUNDS: GeoBounds = GeoBounds::new(
    GeoPoint::new(120.00, 30.12),
    GeoPoint::new(120.35, 30.38),
);

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Grid spacing, roughly 550 m between sample points.
pub const GRID_STEP_KM: f64 = 0.55;

/// City-wide minimum macro price (¥/m²).
pub const FLOOR_PRICE: f64 = 25_000.0;

/// Samples below this price are treated as water or unbuildable land.
pub const DISCARD_THRESHOLD: f64 = 28_000.0;

/// Heat-intensity normalization cap. Prices above this still exist, they
/// just saturate the heatmap.
pub const CAP_PRICE: f64 = 160_000.0;

/// Per-sample multiplicative noise span.
pub const NOISE_MIN: f64 = 0.85;
pub const NOISE_MAX: f64 = 1.15;

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The full synthesis configuration for Hangzhou.
pub fn hangzhou_config() -> FieldConfig {
    FieldConfig {
        bounds: FIELD_BOUNDS,
        grid_step_km: GRID_STEP_KM,
        floor_price: FLOOR_PRICE,
        discard_threshold: DISCARD_THRESHOLD,
        cap_price: CAP_PRICE,
        noise_min: NOISE_MIN,
        noise_max: NOISE_MAX,
        attractors: attractors(),
        facilities: facilities(),
        exclusions: exclusions(),
    }
}

/// Economic centres. Qianjiang CBD dominates the east bank, West Lake the
/// historic core.
pub fn attractors() -> Vec<Attractor> {
    vec![
        Attractor {
            location: GeoPoint::new(120.2109, 30.2442),
            base_price: 90_000.0,
            decay_rate: 0.4,
        },
        Attractor {
            location: GeoPoint::new(120.1468, 30.2476),
            base_price: 85_000.0,
            decay_rate: 0.3,
        },
    ]
}

/// Point amenities with their price boosts and influence radii.
pub fn facilities() -> Vec<Facility> {
    fn facility(
        name: &str,
        kind: FacilityKind,
        lng: f64,
        lat: f64,
        boost: f64,
        radius_km: f64,
        color: &str,
        icon: &str,
    ) -> Facility {
        Facility {
            name: name.to_string(),
            kind,
            location: GeoPoint::new(lng, lat),
            boost,
            radius_km,
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }

    vec![
        facility(
            "浙一医院 (First Affiliated)",
            FacilityKind::Hospital,
            120.180,
            30.250,
            15_000.0,
            2.0,
            "#3b82f6",
            "🏥",
        ),
        facility(
            "邵逸夫医院 (Sir Run Run Shaw)",
            FacilityKind::Hospital,
            120.205,
            30.260,
            18_000.0,
            2.5,
            "#3b82f6",
            "🏥",
        ),
        facility(
            "浙江大学 (ZJU Yuquan)",
            FacilityKind::School,
            120.125,
            30.263,
            25_000.0,
            1.5,
            "#10b981",
            "🎓",
        ),
        facility(
            "杭州高级中学 (Hangzhou High)",
            FacilityKind::School,
            120.170,
            30.255,
            30_000.0,
            1.2,
            "#10b981",
            "🎓",
        ),
        facility(
            "学军中学 (Xuejun High)",
            FacilityKind::School,
            120.135,
            30.275,
            28_000.0,
            1.2,
            "#10b981",
            "🎓",
        ),
        facility(
            "市民中心 (Citizen Center)",
            FacilityKind::Government,
            120.212,
            30.245,
            12_000.0,
            3.0,
            "#f59e0b",
            "⚖️",
        ),
        facility(
            "省政府 (Provincial Gov)",
            FacilityKind::Government,
            120.155,
            30.265,
            10_000.0,
            2.0,
            "#f59e0b",
            "⚖️",
        ),
    ]
}

/// Large water bodies. Low-priced samples inside these circles are dropped;
/// the expensive shoreline band survives.
pub fn exclusions() -> Vec<ExclusionRegion> {
    vec![
        ExclusionRegion {
            name: "西湖 (West Lake)".to_string(),
            center: GeoPoint::new(120.140, 30.240),
            radius_km: 2.2,
            secondary_threshold: 52_000.0,
        },
        ExclusionRegion {
            name: "西溪湿地 (Xixi Wetland)".to_string(),
            center: GeoPoint::new(120.0636, 30.2608),
            radius_km: 2.0,
            secondary_threshold: 40_000.0,
        },
    ]
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
