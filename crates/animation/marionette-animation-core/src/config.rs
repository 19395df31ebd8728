//! Core configuration.

use serde::{Deserialize, Serialize};

/// Subdivision resolution used when no configuration is provided.
pub const DEFAULT_BEZIER_SAMPLES: usize = 200;

/// Tuning knobs for playback construction.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Sample count for fixed-resolution Bézier subdivision. Higher values
    /// trade derivation cost for evaluation accuracy.
    pub bezier_samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bezier_samples: DEFAULT_BEZIER_SAMPLES,
        }
    }
}
