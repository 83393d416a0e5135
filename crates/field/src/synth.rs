//! Land-value field synthesis.
//!
//! One call to [`synthesize_field`] walks a regular lat/lng grid over the
//! configured bounds and prices every node from three ingredients:
//!
//! 1. a macro price from the economic attractors (distance-decayed, the
//!    strongest centre wins),
//! 2. additive facility bonuses with linear radius falloff,
//! 3. uniform multiplicative noise, drawn fresh per node.
//!
//! Nodes are jittered by up to half a grid cell so the output does not look
//! mechanically gridded, and implausibly cheap nodes are dropped entirely —
//! that is how water and unbuildable terrain show up as holes in the field
//! without modelling actual terrain.
//!
//! The output is generated once and is deterministic for a given seed. There
//! is no incremental update path: if the attractor or facility set changes,
//! the whole collection is regenerated.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::FieldConfig;
use crate::geo::{haversine_km, GeoBounds, GeoPoint, KM_PER_DEG_LAT, KM_PER_DEG_LNG_EQUATOR};
use crate::types::{Attractor, Facility, FieldCollection, InfluenceZone, ValueSample};

/// Vertices per influence ring, excluding the closing vertex.
pub const RING_VERTICES: usize = 64;

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// Degree step sizes for a grid of `step_km` spacing over `bounds`.
///
/// Longitude degrees shrink with latitude, so the lng step is scaled by the
/// cosine of the mid-latitude (equirectangular approximation — fine at city
/// scale).
fn degree_steps(bounds: &GeoBounds, step_km: f64) -> (f64, f64) {
    let lat_step = step_km / KM_PER_DEG_LAT;
    let lng_step = step_km / (KM_PER_DEG_LNG_EQUATOR * bounds.mid_lat().to_radians().cos());
    (lng_step, lat_step)
}

/// Number of (columns, rows) the grid walk visits.
pub fn grid_shape(bounds: &GeoBounds, step_km: f64) -> (usize, usize) {
    let (lng_step, lat_step) = degree_steps(bounds, step_km);
    let cols = ((bounds.ne.lng - bounds.sw.lng) / lng_step).floor() as usize + 1;
    let rows = ((bounds.ne.lat - bounds.sw.lat) / lat_step).floor() as usize + 1;
    (cols, rows)
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Macro price at a point: the strongest attractor influence, clamped from
/// below by the city-wide floor. Attractors combine by max, not sum — the
/// dominant centre wins, influence is not cumulative.
fn macro_price(point: GeoPoint, floor: f64, attractors: &[Attractor]) -> f64 {
    attractors
        .iter()
        .map(|a| a.influence_at(haversine_km(point, a.location)))
        .fold(floor, f64::max)
}

/// Sum of all facility bonuses reaching the point.
fn facility_bonus(point: GeoPoint, facilities: &[Facility]) -> f64 {
    facilities
        .iter()
        .map(|f| f.bonus_at(haversine_km(point, f.location)))
        .sum()
}

/// Display label for a price, in units of 万 (10,000 yuan).
fn format_price_label(price: f64) -> String {
    format!("¥{:.1}万", price / 10_000.0)
}

// ---------------------------------------------------------------------------
// Influence rings
// ---------------------------------------------------------------------------

/// Closed ring approximating a circle of `radius_km` around `center`.
///
/// Equirectangular: one degree of latitude is ~110.574 km, one degree of
/// longitude ~111.32·cos(lat) km. The first vertex is repeated at the end.
fn influence_ring(center: GeoPoint, radius_km: f64) -> Vec<GeoPoint> {
    let dx = radius_km / (KM_PER_DEG_LNG_EQUATOR * center.lat.to_radians().cos());
    let dy = radius_km / KM_PER_DEG_LAT;

    let mut ring = Vec::with_capacity(RING_VERTICES + 1);
    for i in 0..RING_VERTICES {
        let theta = (i as f64 / RING_VERTICES as f64) * std::f64::consts::TAU;
        ring.push(GeoPoint::new(
            center.lng + dx * theta.cos(),
            center.lat + dy * theta.sin(),
        ));
    }
    let first = ring[0];
    ring.push(first);
    ring
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Synthesize the full field collection from a validated configuration.
///
/// Deterministic for a given RNG state. Call [`FieldConfig::validate`]
/// before this; degenerate decay rates or radii are a configuration error,
/// not something this function guards against.
pub fn synthesize_field(config: &FieldConfig, rng: &mut ChaCha8Rng) -> FieldCollection {
    let (lng_step, lat_step) = degree_steps(&config.bounds, config.grid_step_km);
    let (cols, rows) = grid_shape(&config.bounds, config.grid_step_km);

    let mut samples = Vec::with_capacity(cols * rows / 2);

    for row in 0..rows {
        let grid_lat = config.bounds.sw.lat + row as f64 * lat_step;
        for col in 0..cols {
            let grid_lng = config.bounds.sw.lng + col as f64 * lng_step;

            // Jitter by at most half a cell on each axis.
            let lng = grid_lng + (rng.gen::<f64>() - 0.5) * lng_step;
            let lat = grid_lat + (rng.gen::<f64>() - 0.5) * lat_step;
            let noise = rng.gen_range(config.noise_min..config.noise_max);

            let point = GeoPoint::new(lng, lat);
            let base = macro_price(point, config.floor_price, &config.attractors);
            let bonus = facility_bonus(point, &config.facilities);
            let price = ((base + bonus) * noise).floor();

            if price < config.discard_threshold {
                continue;
            }
            let in_dead_water = config.exclusions.iter().any(|region| {
                price < region.secondary_threshold
                    && haversine_km(point, region.center) < region.radius_km
            });
            if in_dead_water {
                continue;
            }

            samples.push(ValueSample {
                location: point,
                price,
                normalized_weight: price.min(config.cap_price) / config.cap_price,
                formatted_label: format_price_label(price),
            });
        }
    }

    let zones = config
        .facilities
        .iter()
        .map(|facility| InfluenceZone {
            facility_name: facility.name.clone(),
            kind: facility.kind,
            color: facility.color.clone(),
            boost: facility.boost,
            ring: influence_ring(facility.location, facility.radius_km),
        })
        .collect();

    FieldCollection {
        samples,
        facilities: config.facilities.clone(),
        zones,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExclusionRegion;
    use crate::dataset;
    use crate::rng::FieldRng;
    use crate::types::FacilityKind;

    fn cbd_attractor() -> Attractor {
        Attractor {
            location: GeoPoint::new(120.21, 30.24),
            base_price: 90_000.0,
            decay_rate: 0.4,
        }
    }

    /// A point exactly `km` kilometres due north of `origin` (great-circle).
    fn north_of(origin: GeoPoint, km: f64) -> GeoPoint {
        GeoPoint::new(origin.lng, origin.lat + (km / crate::geo::EARTH_RADIUS_KM).to_degrees())
    }

    #[test]
    fn macro_price_at_centre_is_base_price() {
        let a = cbd_attractor();
        let v = macro_price(a.location, 25_000.0, &[a.clone()]);
        assert!((v - 90_000.0).abs() < 1e-6);
    }

    #[test]
    fn macro_price_five_km_out_is_e_minus_two() {
        let a = cbd_attractor();
        let v = macro_price(north_of(a.location, 5.0), 0.0, &[a.clone()]);
        // 90000 * e^-2 ≈ 12181; the haversine vs. flat-north offset costs
        // well under a metre, so the tolerance is tight.
        assert!((12_170.0..12_195.0).contains(&v), "unexpected macro price: {v}");
    }

    #[test]
    fn macro_price_clamps_to_floor() {
        let a = cbd_attractor();
        let far = north_of(a.location, 50.0);
        let v = macro_price(far, 25_000.0, &[a.clone()]);
        assert_eq!(v, 25_000.0);
    }

    #[test]
    fn macro_price_takes_the_dominant_centre_not_the_sum() {
        let a = cbd_attractor();
        let mut b = cbd_attractor();
        b.base_price = 85_000.0;
        // Both centres at the same spot: max gives 90k, a sum would give 175k.
        let v = macro_price(a.location, 0.0, &[a.clone(), b]);
        assert!((v - 90_000.0).abs() < 1e-6);
    }

    #[test]
    fn facility_bonus_matches_linear_falloff() {
        let f = Facility {
            name: "Test Hospital".into(),
            kind: FacilityKind::Hospital,
            location: GeoPoint::new(120.18, 30.25),
            boost: 15_000.0,
            radius_km: 2.0,
            color: "#3b82f6".into(),
            icon: "H".into(),
        };
        let at_1km = facility_bonus(north_of(f.location, 1.0), std::slice::from_ref(&f));
        assert!((at_1km - 7_500.0).abs() < 10.0, "unexpected bonus: {at_1km}");
        let at_2_5km = facility_bonus(north_of(f.location, 2.5), std::slice::from_ref(&f));
        assert_eq!(at_2_5km, 0.0);
    }

    #[test]
    fn price_label_is_formatted_in_wan() {
        assert_eq!(format_price_label(123_456.0), "¥12.3万");
        assert_eq!(format_price_label(85_000.0), "¥8.5万");
    }

    #[test]
    fn influence_ring_is_closed_and_dense() {
        let ring = influence_ring(GeoPoint::new(120.18, 30.25), 2.0);
        assert_eq!(ring.len(), RING_VERTICES + 1);
        assert!(ring.len() > 32);
        assert_eq!(ring[0], *ring.last().unwrap());
    }

    #[test]
    fn influence_ring_radius_is_accurate() {
        let center = GeoPoint::new(120.18, 30.25);
        for vertex in influence_ring(center, 2.0) {
            let d = haversine_km(center, vertex);
            assert!((1.9..2.1).contains(&d), "ring vertex at {d} km");
        }
    }

    #[test]
    fn same_seed_reproduces_the_field_exactly() {
        let config = dataset::hangzhou_config();
        let a = synthesize_field(&config, &mut FieldRng::from_seed_u64(7).0);
        let b = synthesize_field(&config, &mut FieldRng::from_seed_u64(7).0);
        assert_eq!(a.samples.len(), b.samples.len());
        for (x, y) in a.samples.iter().zip(&b.samples) {
            assert_eq!(x.location, y.location);
            assert_eq!(x.price, y.price);
        }
    }

    #[test]
    fn different_seeds_produce_different_fields() {
        let config = dataset::hangzhou_config();
        let a = synthesize_field(&config, &mut FieldRng::from_seed_u64(1).0);
        let b = synthesize_field(&config, &mut FieldRng::from_seed_u64(2).0);
        let same = a
            .samples
            .iter()
            .zip(&b.samples)
            .take_while(|(x, y)| x.location == y.location)
            .count();
        assert!(same < a.samples.len().min(b.samples.len()));
    }

    #[test]
    fn discarding_never_emits_more_samples_than_grid_nodes() {
        let config = dataset::hangzhou_config();
        let (cols, rows) = grid_shape(&config.bounds, config.grid_step_km);
        let field = synthesize_field(&config, &mut FieldRng::default().0);
        assert!(!field.samples.is_empty());
        assert!(field.samples.len() <= cols * rows);
    }

    #[test]
    fn weights_are_normalized_and_monotonic_in_price() {
        let config = dataset::hangzhou_config();
        let mut field = synthesize_field(&config, &mut FieldRng::default().0);
        for s in &field.samples {
            assert!((0.0..=1.0).contains(&s.normalized_weight), "weight {}", s.normalized_weight);
            assert!(s.price >= config.discard_threshold);
        }
        field
            .samples
            .sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap());
        for pair in field.samples.windows(2) {
            assert!(pair[1].normalized_weight >= pair[0].normalized_weight);
        }
    }

    #[test]
    fn jitter_moves_every_sample_off_the_raw_grid() {
        let config = dataset::hangzhou_config();
        let (lng_step, lat_step) = degree_steps(&config.bounds, config.grid_step_km);
        let field = synthesize_field(&config, &mut FieldRng::default().0);
        let on_grid = field.samples.iter().filter(|s| {
            let col_offset = ((s.location.lng - config.bounds.sw.lng) / lng_step).fract();
            let row_offset = ((s.location.lat - config.bounds.sw.lat) / lat_step).fract();
            col_offset.abs() < 1e-9 && row_offset.abs() < 1e-9
        });
        assert_eq!(on_grid.count(), 0);
    }

    #[test]
    fn exclusion_region_swallows_cheap_samples() {
        let mut config = dataset::hangzhou_config();
        let lake = GeoPoint::new(120.10, 30.25);
        config.exclusions = vec![ExclusionRegion {
            name: "test lake".into(),
            center: lake,
            radius_km: 3.0,
            secondary_threshold: f64::MAX,
        }];
        let field = synthesize_field(&config, &mut FieldRng::default().0);
        for s in &field.samples {
            assert!(
                haversine_km(s.location, lake) >= 3.0,
                "sample inside the exclusion circle at {:?}",
                s.location
            );
        }
    }

    #[test]
    fn one_zone_per_facility() {
        let config = dataset::hangzhou_config();
        let field = synthesize_field(&config, &mut FieldRng::default().0);
        assert_eq!(field.zones.len(), config.facilities.len());
        for zone in &field.zones {
            assert_eq!(zone.ring.first(), zone.ring.last());
        }
    }
}
