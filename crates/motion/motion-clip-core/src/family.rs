//! Clip families: the frame layout a clip was recorded with.
//!
//! The family is carried explicitly by the catalog entry. Width, yaw channel
//! and joint table all hang off it, so nothing downstream branches on a raw
//! width constant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClipError;
use crate::rig::{self, RigMapping};

/// Hip/knee channels cross-faded during the loop blend (both families).
const LEG_BLEND_CHANNELS: [usize; 4] = [3, 4, 5, 6];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipFamily {
    /// Mini Cheetah planner output, 22 floats per frame.
    #[serde(alias = "mini_cheetah")]
    Cheetah,
    /// Go1 offline planner output, 63 floats per frame.
    Go1,
}

impl ClipFamily {
    pub const ALL: [ClipFamily; 2] = [ClipFamily::Cheetah, ClipFamily::Go1];

    /// Number of `f32` values per frame.
    #[inline]
    pub const fn frame_width(self) -> usize {
        match self {
            ClipFamily::Cheetah => 22,
            ClipFamily::Go1 => 63,
        }
    }

    /// Bytes per frame.
    #[inline]
    pub const fn frame_stride(self) -> usize {
        self.frame_width() * std::mem::size_of::<f32>()
    }

    /// Channel holding the body yaw (radians).
    #[inline]
    pub const fn yaw_channel(self) -> usize {
        match self {
            ClipFamily::Cheetah => 2,
            ClipFamily::Go1 => 10,
        }
    }

    /// Channels other than yaw that the loop blend interpolates.
    /// Everything else reads zero in a blended frame.
    #[inline]
    pub fn leg_blend_channels(self) -> &'static [usize] {
        &LEG_BLEND_CHANNELS
    }

    /// Per-rig channel tables for this family.
    #[inline]
    pub fn rig_mappings(self) -> &'static [RigMapping] {
        rig::mappings(self)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ClipFamily::Cheetah => "cheetah",
            ClipFamily::Go1 => "go1",
        }
    }
}

impl fmt::Display for ClipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClipFamily {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheetah" | "mini_cheetah" => Ok(ClipFamily::Cheetah),
            "go1" => Ok(ClipFamily::Go1),
            other => Err(ClipError::UnknownFamily(other.to_string())),
        }
    }
}
