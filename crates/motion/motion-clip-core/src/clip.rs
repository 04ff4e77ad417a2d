//! Decoded motion clips.
//!
//! On disk a clip is `frame_count * width` little-endian `f32` values with no
//! header. The width is not stored in the file; it comes from the family tag
//! supplied by whoever loads the clip.

use log::warn;

use crate::error::ClipError;
use crate::family::ClipFamily;

/// An immutable, decoded motion clip. Always holds at least one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionClip {
    name: String,
    family: ClipFamily,
    frame_count: usize,
    values: Vec<f32>,
}

impl MotionClip {
    /// Decode a raw clip buffer using the family's frame width.
    pub fn from_bytes(
        name: impl Into<String>,
        family: ClipFamily,
        bytes: &[u8],
    ) -> Result<Self, ClipError> {
        let stride = family.frame_stride();
        if bytes.len() % stride != 0 {
            return Err(ClipError::MalformedClip {
                len: bytes.len(),
                stride,
            });
        }
        if bytes.is_empty() {
            return Err(ClipError::EmptyClip);
        }
        let values: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self {
            name: name.into(),
            family,
            frame_count: bytes.len() / stride,
            values,
        })
    }

    /// Build a clip from already-decoded values laid out frame after frame.
    pub fn from_values(
        name: impl Into<String>,
        family: ClipFamily,
        values: Vec<f32>,
    ) -> Result<Self, ClipError> {
        let width = family.frame_width();
        if values.len() % width != 0 {
            return Err(ClipError::MalformedClip {
                len: values.len() * 4,
                stride: family.frame_stride(),
            });
        }
        if values.is_empty() {
            return Err(ClipError::EmptyClip);
        }
        Ok(Self {
            name: name.into(),
            family,
            frame_count: values.len() / width,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> ClipFamily {
        self.family
    }

    #[inline]
    pub fn frame_width(&self) -> usize {
        self.family.frame_width()
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Bounds-checked frame read. Out-of-range indices are logged and clamped
    /// to the last frame.
    pub fn frame_at(&self, t: usize) -> &[f32] {
        let last = self.frame_count - 1;
        let idx = if t > last {
            warn!(
                "clip '{}': timestep {t} past last frame {last}, clamping",
                self.name
            );
            last
        } else {
            t
        };
        let width = self.frame_width();
        &self.values[idx * width..(idx + 1) * width]
    }

    #[inline]
    pub fn first_frame(&self) -> &[f32] {
        self.frame_at(0)
    }

    #[inline]
    pub fn last_frame(&self) -> &[f32] {
        self.frame_at(self.frame_count - 1)
    }

    pub fn frames(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.values.chunks_exact(self.frame_width())
    }

    /// Ticks in one full loop: every frame plus the blend pad, saturating at
    /// `usize::MAX`.
    #[inline]
    pub fn loop_len(&self, blend_pad: usize) -> usize {
        self.frame_count.saturating_add(blend_pad)
    }
}
