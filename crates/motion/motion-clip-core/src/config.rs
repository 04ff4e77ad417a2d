//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::error::ClipError;

/// Number of ticks spent cross-fading from the last frame back to the first.
pub const DEFAULT_BLEND_PAD: usize = 100;

/// Configuration for a [`crate::ClipPlayer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Ticks reserved after the last frame for the loop blend.
    pub blend_pad: usize,
    /// Yaw values (radians) of the last frame below this are unwrapped by a
    /// full turn before blending back to the first frame.
    pub yaw_unwrap_threshold: f32,
    /// Dump every sampled frame at `trace` level (values in degrees).
    pub trace_frames: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            blend_pad: DEFAULT_BLEND_PAD,
            yaw_unwrap_threshold: -std::f32::consts::PI,
            trace_frames: false,
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON config object. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ClipError> {
        serde_json::from_str(s).map_err(|e| ClipError::Catalog(format!("config parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = PlayerConfig::from_json_str(r#"{ "blend_pad": 20 }"#).unwrap();
        assert_eq!(cfg.blend_pad, 20);
        assert_eq!(cfg.yaw_unwrap_threshold, -std::f32::consts::PI);
        assert!(!cfg.trace_frames);
    }
}
