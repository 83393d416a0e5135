//! Landmark camera presets and the default view.
//!
//! Each landmark stores a complete camera pose; selecting one issues a
//! single bounded fly-to animation.

use field::dataset::MAP_BOUNDS;
use field::geo::GeoPoint;

use crate::engine::{CameraPose, EngineConfig, StyleId};

/// Fly-to animation length. Fixed: every landmark transition takes the
/// same two seconds regardless of distance.
pub const FLY_TO_DURATION_MS: u32 = 2000;

/// Hard zoom-out limit for the engine.
pub const MIN_ZOOM: f64 = 10.0;

/// Where the camera starts.
pub const DEFAULT_CAMERA: CameraPose = CameraPose {
    lng: 120.19,
    lat: 30.25,
    zoom: 13.0,
    pitch: 55.0,
    bearing: -10.0,
};

/// A named place with its stored camera pose.
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub location: GeoPoint,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Landmark {
    /// The camera pose this landmark flies to.
    pub fn camera(&self) -> CameraPose {
        CameraPose {
            lng: self.location.lng,
            lat: self.location.lat,
            zoom: self.zoom,
            pitch: self.pitch,
            bearing: self.bearing,
        }
    }
}

/// The landmark list shown in the panel, in display order.
pub const LANDMARKS: [Landmark; 5] = [
    Landmark {
        id: "cbd",
        name: "钱江新城 (CBD)",
        description: "Modern central business district with iconic architecture.",
        location: GeoPoint::new(120.2109, 30.2442),
        zoom: 15.5,
        pitch: 65.0,
        bearing: -20.0,
    },
    Landmark {
        id: "westlake",
        name: "西湖 (West Lake)",
        description: "UNESCO World Heritage site, classical beauty.",
        location: GeoPoint::new(120.1468, 30.2476),
        zoom: 14.0,
        pitch: 50.0,
        bearing: 90.0,
    },
    Landmark {
        id: "binjiang",
        name: "滨江 (Binjiang)",
        description: "High-tech district, home to major tech companies.",
        location: GeoPoint::new(120.2155, 30.1834),
        zoom: 15.0,
        pitch: 60.0,
        bearing: 45.0,
    },
    Landmark {
        id: "gongshu",
        name: "拱墅 (Gongshu)",
        description: "Historic district along the Grand Canal.",
        location: GeoPoint::new(120.1588, 30.3200),
        zoom: 14.5,
        pitch: 45.0,
        bearing: 0.0,
    },
    Landmark {
        id: "xixi",
        name: "西溪湿地 (Xixi Wetland)",
        description: "Urban wetland park and ecological preserve.",
        location: GeoPoint::new(120.0636, 30.2608),
        zoom: 13.5,
        pitch: 40.0,
        bearing: 0.0,
    },
];

/// Engine construction config for the Hangzhou viewer.
pub fn default_engine_config() -> EngineConfig {
    EngineConfig {
        style: StyleId::NavigationNight,
        camera: DEFAULT_CAMERA,
        max_bounds: MAP_BOUNDS,
        min_zoom: MIN_ZOOM,
        antialias: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_ids_are_unique() {
        for (i, a) in LANDMARKS.iter().enumerate() {
            for b in &LANDMARKS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn every_landmark_sits_inside_the_pan_bounds() {
        for landmark in &LANDMARKS {
            assert!(
                MAP_BOUNDS.contains(landmark.location),
                "{} is outside the pan bounds",
                landmark.id
            );
        }
    }

    #[test]
    fn landmark_camera_carries_the_stored_pose() {
        let cbd = &LANDMARKS[0];
        let pose = cbd.camera();
        assert_eq!(pose.lng, cbd.location.lng);
        assert_eq!(pose.zoom, 15.5);
        assert_eq!(pose.pitch, 65.0);
    }

    #[test]
    fn default_config_starts_at_night_over_hangzhou() {
        let config = default_engine_config();
        assert_eq!(config.style, StyleId::NavigationNight);
        assert!(config.max_bounds.contains(GeoPoint::new(
            config.camera.lng,
            config.camera.lat
        )));
    }
}
