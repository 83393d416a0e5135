//! Data-driven visual modes.
//!
//! A [`VisualMode`] is a bundle of building paint properties plus an
//! overlay visibility flag — pure configuration. The controller applies
//! whichever mode matches its analysis flag and never branches on mode
//! identity, so adding a third mode means adding data here, nothing else.

use serde_json::{json, Value};

/// One complete visual treatment of the map.
#[derive(Debug, Clone)]
pub struct VisualMode {
    pub id: &'static str,
    /// Which value of the analysis flag selects this mode.
    pub analysis: bool,
    /// Paint properties applied to the building extrusion layer.
    pub building_paint: Vec<(&'static str, Value)>,
    /// Whether the value overlays (heat, labels, zones, markers) show.
    pub overlays_visible: bool,
}

/// The set of available modes. Selection is by flag match, first hit wins.
#[derive(Debug, Clone)]
pub struct ModeCatalog {
    pub modes: Vec<VisualMode>,
}

impl ModeCatalog {
    /// The two built-in modes: subdued Normal and the value-analysis view.
    pub fn builtin() -> Self {
        Self {
            modes: vec![normal_mode(), analysis_mode()],
        }
    }

    /// Mode for the given analysis flag, first match wins. Falls back to
    /// the first entry when no flag matches; `None` only for an empty
    /// catalog.
    pub fn for_analysis(&self, analysis: bool) -> Option<&VisualMode> {
        self.modes
            .iter()
            .find(|m| m.analysis == analysis)
            .or_else(|| self.modes.first())
    }
}

/// Subdued monochrome city: buildings colored by height alone, overlays
/// hidden.
fn normal_mode() -> VisualMode {
    VisualMode {
        id: "normal",
        analysis: false,
        overlays_visible: false,
        building_paint: vec![
            (
                "fill-extrusion-color",
                json!([
                    "interpolate", ["linear"], ["get", "height"],
                    0, "#2a2a2a",
                    50, "#4a4a4a",
                    100, "#5a7a9a",
                    300, "#8ab4d4"
                ]),
            ),
            (
                "fill-extrusion-height",
                json!(["interpolate", ["linear"], ["zoom"], 13, 0, 13.05, ["get", "height"]]),
            ),
            (
                "fill-extrusion-base",
                json!(["interpolate", ["linear"], ["zoom"], 13, 0, 13.05, ["get", "min_height"]]),
            ),
        ],
    }
}

/// Analysis view: a hotter, steeper height ramp with exaggerated extrusion
/// so tall stock pops, plus all value overlays visible.
fn analysis_mode() -> VisualMode {
    VisualMode {
        id: "analysis",
        analysis: true,
        overlays_visible: true,
        building_paint: vec![
            (
                "fill-extrusion-color",
                json!([
                    "interpolate", ["linear"], ["get", "height"],
                    0, "#1d3557",
                    30, "#457b9d",
                    80, "#e9c46a",
                    160, "#f4a261",
                    300, "#e76f51"
                ]),
            ),
            (
                "fill-extrusion-height",
                json!([
                    "interpolate", ["linear"], ["zoom"],
                    13, 0,
                    13.05, ["*", ["get", "height"], 1.3]
                ]),
            ),
            (
                "fill-extrusion-base",
                json!(["interpolate", ["linear"], ["zoom"], 13, 0, 13.05, ["get", "min_height"]]),
            ),
        ],
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_covers_both_flag_values() {
        let catalog = ModeCatalog::builtin();
        assert_eq!(catalog.for_analysis(false).unwrap().id, "normal");
        assert_eq!(catalog.for_analysis(true).unwrap().id, "analysis");
    }

    #[test]
    fn overlays_show_only_in_analysis() {
        let catalog = ModeCatalog::builtin();
        assert!(!catalog.for_analysis(false).unwrap().overlays_visible);
        assert!(catalog.for_analysis(true).unwrap().overlays_visible);
    }

    #[test]
    fn empty_catalog_yields_no_mode() {
        let catalog = ModeCatalog { modes: vec![] };
        assert!(catalog.for_analysis(true).is_none());
    }

    #[test]
    fn modes_paint_the_same_properties_differently() {
        let catalog = ModeCatalog::builtin();
        let normal = catalog.for_analysis(false).unwrap();
        let analysis = catalog.for_analysis(true).unwrap();
        // Same property keys so a toggle overwrites every paint slot...
        let keys = |m: &VisualMode| m.building_paint.iter().map(|(k, _)| *k).collect::<Vec<_>>();
        assert_eq!(keys(normal), keys(analysis));
        // ...with different color ramps.
        assert_ne!(normal.building_paint[0].1, analysis.building_paint[0].1);
    }

    #[test]
    fn a_custom_mode_takes_priority_without_code_changes() {
        let mut catalog = ModeCatalog::builtin();
        catalog.modes.insert(
            0,
            VisualMode {
                id: "custom-night-analysis",
                analysis: true,
                overlays_visible: true,
                building_paint: vec![("fill-extrusion-color", json!("#ff00ff"))],
            },
        );
        assert_eq!(catalog.for_analysis(true).unwrap().id, "custom-night-analysis");
        assert_eq!(catalog.for_analysis(false).unwrap().id, "normal");
    }
}
