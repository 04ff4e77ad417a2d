//! Per-tick output contracts.
//!
//! Adapters apply the sampled frame through a [`crate::JointSink`] and can
//! forward the report (events, cursor, state) to the host.

use serde::{Deserialize, Serialize};

use crate::ids::ClipId;
use crate::sampling::Phase;

/// Playback state derived from the cursor position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Playing,
    LoopBlend,
}

impl PlaybackState {
    /// State after a tick left the cursor at `cursor`.
    /// `0` is idle, `1..=n` playing, `n+1..=n+pad` blending.
    pub fn from_cursor(cursor: usize, frame_count: usize) -> Self {
        if cursor == 0 {
            PlaybackState::Idle
        } else if cursor <= frame_count {
            PlaybackState::Playing
        } else {
            PlaybackState::LoopBlend
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::LoopBlend => "loop_blend",
        }
    }
}

/// Discrete signals emitted while stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// The first frame of a clip was emitted.
    ClipStarted { clip: ClipId },
    /// The first blend tick after the last frame.
    LoopBlendStarted { clip: ClipId },
    /// The cursor passed the end of the blend pad and was reset to 0.
    Wrapped { clip: ClipId },
}

/// Summary of one tick, returned by [`crate::ClipPlayer::tick_into`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub clip: ClipId,
    /// Cursor the frame was sampled at.
    pub cursor: usize,
    pub phase: Phase,
    pub state: PlaybackState,
    #[serde(default)]
    pub events: Vec<PlaybackEvent>,
}
