use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tunable thresholds for the analysis pipeline. Every heuristic constant
/// lives here so it can be overridden per call (e.g. from a TOML file with
/// only the fields being changed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Maximum number of Line blocks sampled for writing-angle estimation.
    pub angle_samples: usize,
    /// Two prices join the same column when the perpendicular-angle
    /// difference between their connecting direction and the writing angle
    /// is below this (radians).
    pub column_angle_threshold: f64,
    /// Maximum distance from a description Line's centroid to the price's
    /// left-center→right-center line for a row match.
    pub row_dist_threshold: f64,
    /// A description must sit at least this far left (upright frame) of the
    /// price's left edge.
    pub column_separator_threshold: f64,
    /// Minimum 0–100 similarity for a Word to count as a total label.
    pub total_match_threshold: f64,
    /// Candidate total labels in priority order. The first label whose best
    /// match clears the threshold wins.
    pub total_labels: Vec<String>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            angle_samples: 30,
            column_angle_threshold: PI / 8.0,
            row_dist_threshold: 0.05,
            column_separator_threshold: 0.2,
            total_match_threshold: 65.0,
            total_labels: ["total", "zu zahlen", "pagar", "zwischensumme", "summe", "suma"]
                .map(String::from)
                .to_vec(),
        }
    }
}
