//! Clip sampling: the per-tick step function and the loop blend.
//!
//! Cursor layout for a clip of `n` frames and a blend pad of `pad` ticks:
//! - `0..n`          verbatim frames
//! - `n..n+pad`      cross-fade from the last frame to the first
//! - `>= n+pad`      wrapped to 0 before sampling
//!
//! Only yaw and the hip/knee channels are blended; every other channel of a
//! blended frame is zero.

use std::f32::consts::TAU;

use log::{debug, log_enabled, trace, Level};

use crate::clip::MotionClip;
use crate::config::PlayerConfig;

#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A verbatim frame from the clip.
    Frame,
    /// A cross-faded frame between the last and first frames.
    LoopBlend,
}

/// Result of one [`advance`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// Cursor the sample was taken at (after any wrap).
    pub cursor: usize,
    pub next_cursor: usize,
    pub phase: Phase,
    /// Blend ratio in `[0, 1)` when `phase` is `LoopBlend`.
    pub ratio: Option<f32>,
    /// The incoming cursor had reached the end of the loop and was reset.
    pub wrapped: bool,
}

/// Same form as three.js `MathUtils.lerp`.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Blend ratio for a cursor inside the pad window.
#[inline]
pub fn blend_ratio(cursor: usize, frame_count: usize, blend_pad: usize) -> f32 {
    if blend_pad == 0 {
        return 0.0;
    }
    cursor.saturating_sub(frame_count) as f32 / blend_pad as f32
}

/// Write the loop-blend frame for `ratio` into `out`.
pub fn blend_loop(clip: &MotionClip, ratio: f32, yaw_unwrap_threshold: f32, out: &mut Vec<f32>) {
    let family = clip.family();
    let first = clip.first_frame();
    let last = clip.last_frame();

    out.clear();
    out.resize(clip.frame_width(), 0.0);

    let yaw = family.yaw_channel();
    let last_yaw = if last[yaw] < yaw_unwrap_threshold {
        last[yaw] + TAU
    } else {
        last[yaw]
    };
    out[yaw] = lerp(last_yaw, first[yaw], ratio);

    for &ch in family.leg_blend_channels() {
        out[ch] = lerp(last[ch], first[ch], ratio);
    }
}

/// Advance `cursor` by one tick on `clip`, writing the sampled frame into `out`.
pub fn advance(clip: &MotionClip, cursor: usize, cfg: &PlayerConfig, out: &mut Vec<f32>) -> Step {
    let n = clip.frame_count();
    let loop_len = clip.loop_len(cfg.blend_pad);

    let wrapped = cursor >= loop_len;
    let cursor = if wrapped {
        debug!("clip '{}': loop complete, wrapping cursor", clip.name());
        0
    } else {
        cursor
    };

    let step = if cursor < n {
        out.clear();
        out.extend_from_slice(clip.frame_at(cursor));
        Step {
            cursor,
            next_cursor: cursor + 1,
            phase: Phase::Frame,
            ratio: None,
            wrapped,
        }
    } else {
        if cursor == n {
            debug!("clip '{}': entering loop blend", clip.name());
        }
        let ratio = blend_ratio(cursor, n, cfg.blend_pad);
        blend_loop(clip, ratio, cfg.yaw_unwrap_threshold, out);
        Step {
            cursor,
            next_cursor: cursor + 1,
            phase: Phase::LoopBlend,
            ratio: Some(ratio),
            wrapped,
        }
    };

    if cfg.trace_frames && log_enabled!(Level::Trace) {
        let degrees: Vec<String> = out
            .iter()
            .enumerate()
            .map(|(i, v)| format!("[{i}]{:.2}", v.to_degrees()))
            .collect();
        trace!("{} {}", step.cursor, degrees.join(" "));
    }
    step
}
