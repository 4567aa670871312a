//! Codec configuration for animio-core.

use serde::{Deserialize, Serialize};

/// Tangent weight the curve system treats as "unweighted".
pub const DEFAULT_TANGENT_WEIGHT: f64 = 1.0 / 3.0;

/// Half-width of the band around [`DEFAULT_TANGENT_WEIGHT`] that still counts as default.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.00005;

/// Indentation width of the persisted JSON document.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Configuration for weight elision and document formatting.
/// Defaults match the files written by the original tool; keep them stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Host default tangent weight.
    pub default_weight: f64,
    /// Weights within `default_weight ± weight_tolerance` are never written back to a curve.
    pub weight_tolerance: f64,
    /// Spaces per indentation level when writing documents.
    pub json_indent: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_TANGENT_WEIGHT,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

impl CodecConfig {
    /// Whether `weight` is indistinguishable from the host default.
    #[inline]
    pub fn is_default_weight(&self, weight: f64) -> bool {
        (weight - self.default_weight).abs() < self.weight_tolerance
    }
}
