//! Synthesis configuration and load-time validation.
//!
//! A `FieldConfig` is validated once when the application starts; the
//! synthesizer itself assumes a valid configuration. Degenerate inputs that
//! would otherwise produce infinite influence (`decay_rate = 0`) or divide
//! by zero (`radius_km = 0`) are rejected here, not guarded at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::GeoBounds;
use crate::types::{Attractor, Facility};

// ---------------------------------------------------------------------------
// Exclusion regions
// ---------------------------------------------------------------------------

/// A circular region (large water body, unbuildable terrain) where
/// low-priced samples are discarded entirely.
///
/// A sample inside the circle is dropped only when its price is also below
/// `secondary_threshold`; expensive shoreline samples survive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionRegion {
    pub name: String,
    pub center: crate::geo::GeoPoint,
    pub radius_km: f64,
    pub secondary_threshold: f64,
}

// ---------------------------------------------------------------------------
// FieldConfig
// ---------------------------------------------------------------------------

/// Everything the synthesizer needs for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Region covered by the sample grid.
    pub bounds: GeoBounds,
    /// Grid spacing in kilometres (~0.5-0.6 km in practice).
    pub grid_step_km: f64,
    /// City-wide minimum macro price.
    pub floor_price: f64,
    /// Samples priced below this are dropped (water, unbuildable land).
    pub discard_threshold: f64,
    /// Upper clamp for heat-intensity normalization. Not a price ceiling.
    pub cap_price: f64,
    /// Uniform multiplicative noise span applied per sample.
    pub noise_min: f64,
    pub noise_max: f64,
    pub attractors: Vec<Attractor>,
    pub facilities: Vec<Facility>,
    pub exclusions: Vec<ExclusionRegion>,
}

impl FieldConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds);
        }
        if self.grid_step_km <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.grid_step_km));
        }
        if self.noise_min <= 0.0 || self.noise_max <= self.noise_min {
            return Err(ConfigError::InvalidNoiseSpan {
                min: self.noise_min,
                max: self.noise_max,
            });
        }
        if self.cap_price <= 0.0 {
            return Err(ConfigError::NonPositiveCap(self.cap_price));
        }
        for (index, attractor) in self.attractors.iter().enumerate() {
            if !attractor.location.is_valid() {
                return Err(ConfigError::OutOfRangePoint {
                    what: "attractor",
                    lng: attractor.location.lng,
                    lat: attractor.location.lat,
                });
            }
            if attractor.base_price <= 0.0 {
                return Err(ConfigError::NonPositiveBasePrice { index, value: attractor.base_price });
            }
            if attractor.decay_rate <= 0.0 {
                return Err(ConfigError::NonPositiveDecay { index, value: attractor.decay_rate });
            }
        }
        for facility in &self.facilities {
            if !facility.location.is_valid() {
                return Err(ConfigError::OutOfRangePoint {
                    what: "facility",
                    lng: facility.location.lng,
                    lat: facility.location.lat,
                });
            }
            if facility.boost <= 0.0 {
                return Err(ConfigError::NonPositiveBoost {
                    name: facility.name.clone(),
                    value: facility.boost,
                });
            }
            if facility.radius_km <= 0.0 {
                return Err(ConfigError::NonPositiveRadius {
                    name: facility.name.clone(),
                    value: facility.radius_km,
                });
            }
        }
        for region in &self.exclusions {
            if region.radius_km <= 0.0 {
                return Err(ConfigError::NonPositiveRadius {
                    name: region.name.clone(),
                    value: region.radius_km,
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Problems detected while validating a [`FieldConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidBounds,
    NonPositiveStep(f64),
    NonPositiveCap(f64),
    InvalidNoiseSpan { min: f64, max: f64 },
    NonPositiveBasePrice { index: usize, value: f64 },
    /// Zero decay would give an attractor infinite reach.
    NonPositiveDecay { index: usize, value: f64 },
    NonPositiveBoost { name: String, value: f64 },
    /// Zero radius would divide by zero in the linear falloff.
    NonPositiveRadius { name: String, value: f64 },
    OutOfRangePoint { what: &'static str, lng: f64, lat: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBounds => write!(f, "bounds are empty or out of WGS84 range"),
            ConfigError::NonPositiveStep(v) => write!(f, "grid step must be positive, got {v}"),
            ConfigError::NonPositiveCap(v) => write!(f, "cap price must be positive, got {v}"),
            ConfigError::InvalidNoiseSpan { min, max } => {
                write!(f, "noise span [{min}, {max}] must be positive and ordered")
            }
            ConfigError::NonPositiveBasePrice { index, value } => {
                write!(f, "attractor #{index}: base price must be positive, got {value}")
            }
            ConfigError::NonPositiveDecay { index, value } => {
                write!(f, "attractor #{index}: decay rate must be positive, got {value}")
            }
            ConfigError::NonPositiveBoost { name, value } => {
                write!(f, "facility '{name}': boost must be positive, got {value}")
            }
            ConfigError::NonPositiveRadius { name, value } => {
                write!(f, "'{name}': radius must be positive, got {value}")
            }
            ConfigError::OutOfRangePoint { what, lng, lat } => {
                write!(f, "{what} location ({lng}, {lat}) is outside WGS84 range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
