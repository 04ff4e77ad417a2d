//! ClipPlayer: owns loaded clips, the active selection and the tick cursor.
//!
//! Methods:
//! - new, load_clip, select / select_by_name, reset, set_playing
//! - tick (sample only) and tick_into (sample + apply to a JointSink)

use hashbrown::HashMap;
use log::info;

use crate::clip::MotionClip;
use crate::config::PlayerConfig;
use crate::error::ClipError;
use crate::family::ClipFamily;
use crate::ids::{ClipId, IdAllocator};
use crate::outputs::{PlaybackEvent, PlaybackState, TickReport};
use crate::sampling::{advance, Phase, Step};
use crate::sink::{apply_frame, JointSink};

/// Loaded clips keyed by id, with a name index.
#[derive(Default, Debug)]
struct ClipLibrary {
    clips: HashMap<ClipId, MotionClip>,
    by_name: HashMap<String, ClipId>,
}

impl ClipLibrary {
    fn get(&self, id: ClipId) -> Option<&MotionClip> {
        self.clips.get(&id)
    }

    fn id_of(&self, name: &str) -> Option<ClipId> {
        self.by_name.get(name).copied()
    }
}

/// One sampled frame, borrowed from the player's scratch buffer.
#[derive(Debug)]
pub struct Sample<'a> {
    pub clip: ClipId,
    pub family: ClipFamily,
    pub step: Step,
    pub frame: &'a [f32],
    pub events: &'a [PlaybackEvent],
}

#[derive(Debug)]
pub struct ClipPlayer {
    cfg: PlayerConfig,
    ids: IdAllocator,
    library: ClipLibrary,
    active: Option<ClipId>,
    cursor: usize,
    playing: bool,

    // Per-tick buffers, reused across ticks.
    scratch: Vec<f32>,
    events: Vec<PlaybackEvent>,
}

impl Default for ClipPlayer {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl ClipPlayer {
    pub fn new(cfg: PlayerConfig) -> Self {
        let width = ClipFamily::ALL
            .iter()
            .map(|f| f.frame_width())
            .max()
            .unwrap_or(0);
        Self {
            cfg,
            ids: IdAllocator::new(),
            library: ClipLibrary::default(),
            active: None,
            cursor: 0,
            playing: true,
            scratch: Vec::with_capacity(width),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.cfg
    }

    /// Decode and register a clip. Reloading an existing name replaces its
    /// data under the same id. The first clip loaded becomes active.
    pub fn load_clip(
        &mut self,
        name: &str,
        family: ClipFamily,
        bytes: &[u8],
    ) -> Result<ClipId, ClipError> {
        let clip = MotionClip::from_bytes(name, family, bytes)?;
        Ok(self.insert_clip(clip))
    }

    /// Register an already-decoded clip.
    pub fn insert_clip(&mut self, clip: MotionClip) -> ClipId {
        let id = match self.library.id_of(clip.name()) {
            Some(id) => id,
            None => {
                let id = self.ids.alloc_clip();
                self.library.by_name.insert(clip.name().to_string(), id);
                id
            }
        };
        info!(
            "loaded clip '{}' ({}, {} frames)",
            clip.name(),
            clip.family(),
            clip.frame_count()
        );
        self.library.clips.insert(id, clip);
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Switch the active clip. The cursor is kept, so a mid-loop switch
    /// continues from the same tick on the new clip's layout.
    pub fn select(&mut self, id: ClipId) -> Result<(), ClipError> {
        if self.library.get(id).is_none() {
            return Err(ClipError::UnknownClip(format!("{id:?}")));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<ClipId, ClipError> {
        let id = self
            .library
            .id_of(name)
            .ok_or_else(|| ClipError::UnknownClip(name.to_string()))?;
        self.active = Some(id);
        Ok(id)
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active(&self) -> Option<ClipId> {
        self.active
    }

    pub fn clip(&self, id: ClipId) -> Option<&MotionClip> {
        self.library.get(id)
    }

    pub fn clip_id(&self, name: &str) -> Option<ClipId> {
        self.library.id_of(name)
    }

    pub fn clip_count(&self) -> usize {
        self.library.clips.len()
    }

    fn active_clip(&self) -> Option<(ClipId, &MotionClip)> {
        let id = self.active?;
        self.library.get(id).map(|c| (id, c))
    }

    pub fn state(&self) -> PlaybackState {
        match self.active_clip() {
            Some((_, clip)) if self.playing => {
                PlaybackState::from_cursor(self.cursor, clip.frame_count())
            }
            _ => PlaybackState::Idle,
        }
    }

    /// Advance the active clip by one tick. `None` when nothing is selected
    /// or playback is paused.
    pub fn tick(&mut self) -> Option<Sample<'_>> {
        if !self.playing {
            return None;
        }
        let id = self.active?;
        let clip = self.library.clips.get(&id)?;

        self.events.clear();
        let step = advance(clip, self.cursor, &self.cfg, &mut self.scratch);
        if step.wrapped {
            self.events.push(PlaybackEvent::Wrapped { clip: id });
        }
        match step.phase {
            Phase::Frame if step.cursor == 0 => {
                self.events.push(PlaybackEvent::ClipStarted { clip: id });
            }
            Phase::LoopBlend if step.cursor == clip.frame_count() => {
                self.events.push(PlaybackEvent::LoopBlendStarted { clip: id });
            }
            _ => {}
        }
        self.cursor = step.next_cursor;

        Some(Sample {
            clip: id,
            family: clip.family(),
            step,
            frame: &self.scratch,
            events: &self.events,
        })
    }

    /// Advance one tick and apply the sampled frame to `sink`.
    pub fn tick_into(&mut self, sink: &mut dyn JointSink) -> Option<TickReport> {
        let (clip, cursor, phase, events) = {
            let sample = self.tick()?;
            apply_frame(sample.family, sample.frame, sink);
            (
                sample.clip,
                sample.step.cursor,
                sample.step.phase,
                sample.events.to_vec(),
            )
        };
        Some(TickReport {
            clip,
            cursor,
            phase,
            state: self.state(),
            events,
        })
    }
}
