use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};
use macroquad::prelude::*;

use crate::animation::{Animation, ClipOption};
use crate::clock::FixedClock;
use crate::error::AnimationError;
use crate::loader::json_loader::Manifest;
use crate::spritesheet::Spritesheet;

/// What happens to the playback phase when [`AnimationSet::switch`] moves to
/// a different clip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitchMode {
    /// Start the new clip from its first frame.
    #[default]
    Restart,
    /// Keep the accumulated tick; the new clip picks up at
    /// `floor(tick) % frames.len()`, possibly mid-cycle.
    Continue,
}

/// A clip registry bound to one texture and sheet layout, with a single
/// playback cursor.
///
/// The set starts idle. Register clips, [`switch`](Self::switch) to one, then
/// call one of the update methods once per host frame and query
/// [`visible_rect`](Self::visible_rect) to draw.
pub struct AnimationSet<T = Texture2D> {
    texture: T,
    sheet: Rc<Spritesheet>,
    clips: HashMap<String, Animation>,
    state: Option<String>,
    tick: f64,
    frame_idx: usize,
    switch_mode: SwitchMode,
}

impl<T> AnimationSet<T> {
    /// Empty, idle set drawing from `texture` laid out as `sheet`.
    pub fn new(texture: T, sheet: Rc<Spritesheet>) -> Self {
        Self {
            texture,
            sheet,
            clips: HashMap::new(),
            state: None,
            tick: 0.0,
            frame_idx: 0,
            switch_mode: SwitchMode::default(),
        }
    }

    /// Builds a set from a decoded manifest and switches to its initial clip,
    /// if it names one.
    pub fn from_manifest(texture: T, manifest: Manifest) -> Result<Self, AnimationError> {
        let mut set = Self::new(texture, Rc::new(manifest.sheet));
        for clip in manifest.clips {
            set.insert_clip(clip)?;
        }
        if let Some(initial) = manifest.initial.as_deref() {
            set.switch(initial);
        }
        Ok(set)
    }

    /// Sets how [`switch`](Self::switch) treats the playback phase.
    pub fn with_switch_mode(mut self, mode: SwitchMode) -> Self {
        self.switch_mode = mode;
        self
    }

    /// See [`with_switch_mode`](Self::with_switch_mode).
    pub fn set_switch_mode(&mut self, mode: SwitchMode) {
        self.switch_mode = mode;
    }

    /// Current switch mode.
    pub fn switch_mode(&self) -> SwitchMode {
        self.switch_mode
    }

    /// Texture handle the frames are cut from.
    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Grid layout shared with other sets.
    pub fn spritesheet(&self) -> &Rc<Spritesheet> {
        &self.sheet
    }

    /// Registers a clip built from `frames` and `opts`.
    ///
    /// An existing clip with the same name is replaced without error.
    pub fn create_clip(
        &mut self,
        name: impl Into<String>,
        frames: Vec<usize>,
        opts: &[ClipOption],
    ) -> Result<(), AnimationError> {
        self.insert_clip(Animation::new(name, frames).with_options(opts))
    }

    /// Registers an already built clip. Frames are checked against the sheet
    /// here so playback never meets an invalid tile.
    pub fn insert_clip(&mut self, clip: Animation) -> Result<(), AnimationError> {
        if clip.name().is_empty() {
            return Err(AnimationError::UnnamedClip);
        }
        if clip.frames().is_empty() {
            return Err(AnimationError::EmptyClip {
                name: clip.name().to_owned(),
            });
        }
        self.sheet.check_frames(clip.frames())?;

        let name = clip.name().to_owned();
        let len = clip.frames().len();
        if self.clips.insert(name.clone(), clip).is_some() {
            debug!("replaced clip '{name}'");
            // the active clip may have shrunk under the cursor
            if self.state.as_deref() == Some(name.as_str()) {
                self.frame_idx = self.phase() % len;
            }
        } else {
            debug!("registered clip '{name}' ({len} frames)");
        }
        Ok(())
    }

    /// Looks up a registered clip.
    pub fn clip(&self, name: &str) -> Option<&Animation> {
        self.clips.get(name)
    }

    /// Whether `name` is registered.
    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Registered clip names, sorted.
    pub fn clip_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clips.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Makes `name` the active clip.
    ///
    /// Unknown names are ignored and leave the cursor untouched. Switching to
    /// the clip that is already playing does nothing.
    pub fn switch(&mut self, name: &str) {
        let Some(clip) = self.clips.get(name) else {
            warn!("ignoring switch to unknown clip '{name}'");
            return;
        };
        if self.state.as_deref() == Some(name) {
            return;
        }

        match self.switch_mode {
            SwitchMode::Restart => {
                self.tick = 0.0;
                self.frame_idx = 0;
            }
            SwitchMode::Continue => {
                self.frame_idx = self.tick.floor() as usize % clip.frames().len();
            }
        }
        debug!("switched {:?} -> '{name}'", self.state);
        self.state = Some(name.to_owned());
    }

    /// Returns to idle and clears the cursor.
    pub fn stop(&mut self) {
        self.state = None;
        self.tick = 0.0;
        self.frame_idx = 0;
    }

    /// Whether `name` is the active clip.
    pub fn is_playing(&self, name: &str) -> bool {
        self.state.as_deref() == Some(name)
    }

    /// Name of the active clip, `None` while idle.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Raw tick accumulator; its integer part selects the frame.
    pub fn tick(&self) -> f64 {
        self.tick
    }

    /// Position of the cursor within the active clip's frame list.
    pub fn current_frame_index(&self) -> usize {
        self.frame_idx
    }

    /// Advances playback by `elapsed` seconds.
    ///
    /// The visible frame is latched from the tick before it grows, so a change
    /// shows up on the following call. Negative, infinite or NaN durations
    /// count as zero.
    pub fn update(&mut self, elapsed: f32) -> Result<(), AnimationError> {
        let fps = self.active_clip()?.fps();
        let dt = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed as f64
        } else {
            0.0
        };
        self.advance(fps as f64 * dt)
    }

    /// Advances playback by one tick of a fixed-rate host loop, adding
    /// `fps / tps` to the accumulator.
    pub fn update_fixed(&mut self, clock: &FixedClock) -> Result<(), AnimationError> {
        let fps = self.active_clip()?.fps();
        self.advance(clock.frames_per_tick(fps))
    }

    /// [`update`](Self::update) with macroquad's last frame time.
    pub fn update_frame(&mut self) -> Result<(), AnimationError> {
        self.update(get_frame_time())
    }

    fn advance(&mut self, frames: f64) -> Result<(), AnimationError> {
        let len = self.active_clip()?.frames().len();
        self.frame_idx = self.phase() % len;
        self.tick += frames;
        Ok(())
    }

    #[inline]
    fn phase(&self) -> usize {
        self.tick.floor() as usize
    }

    /// The clip being played, or [`AnimationError::NoActiveClip`] while idle.
    pub fn active_clip(&self) -> Result<&Animation, AnimationError> {
        self.state
            .as_deref()
            .and_then(|name| self.clips.get(name))
            .ok_or(AnimationError::NoActiveClip)
    }

    /// Tile index currently on screen.
    pub fn current_frame(&self) -> Result<usize, AnimationError> {
        Ok(self.active_clip()?.frames()[self.frame_idx])
    }

    /// Source rectangle of the current frame in texture pixels.
    pub fn visible_rect(&self) -> Result<Rect, AnimationError> {
        self.sheet.tile_rect(self.current_frame()?)
    }
}
