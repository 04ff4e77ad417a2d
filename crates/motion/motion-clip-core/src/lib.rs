//! Motion Clip Core (engine-agnostic)
//!
//! Plays back headerless binary motion clips recorded for quadruped robots.
//! A clip is a flat run of little-endian `f32` frames whose width and channel
//! layout come from an explicit [`ClipFamily`] tag. The [`ClipPlayer`] steps a
//! tick cursor through the clip, then cross-fades from the last frame back to
//! the first for a fixed blend pad before wrapping.
//!
//! Frames are applied to a host robot model through the [`JointSink`] trait,
//! using the data-driven joint tables in [`rig`].

pub mod catalog;
pub mod clip;
pub mod config;
pub mod error;
pub mod family;
pub mod ids;
pub mod outputs;
pub mod player;
pub mod rig;
pub mod sampling;
pub mod sink;

// Re-exports for consumers (adapters)
pub use catalog::{CatalogEntry, ClipCatalog, ClipSource, FsClipSource};
pub use clip::MotionClip;
pub use config::PlayerConfig;
pub use error::ClipError;
pub use family::ClipFamily;
pub use ids::ClipId;
pub use outputs::{PlaybackEvent, PlaybackState, TickReport};
pub use player::{ClipPlayer, Sample};
pub use rig::{JointBinding, Rig};
pub use sampling::{advance, blend_ratio, Phase, Step};
pub use sink::{apply_frame, JointSink, JointWrite, PoseWrites};
